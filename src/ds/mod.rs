pub mod admission_filter;
pub mod arc_lists;
pub mod ordered_set;
pub mod segmented_list;
pub mod slot_arena;

pub use admission_filter::AdmissionFilter;
pub use arc_lists::{ArcList, ArcLists};
pub use ordered_set::OrderedSet;
pub use segmented_list::{SegmentIter, SegmentedList};
pub use slot_arena::{SlotArena, SlotId};
