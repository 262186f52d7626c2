pub use crate::builder::{PolicyBuilder, PolicyKind};
pub use crate::ds::{AdmissionFilter, ArcList, ArcLists, OrderedSet, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError, SimError, TraceError};
pub use crate::policy::arc::{ArcCache, ArcCore};
pub use crate::policy::larc::LarcCache;
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::lru::LruCache;
pub use crate::policy::marc::MarcCache;
pub use crate::policy::regime::Regime;
pub use crate::sim::{OutputFormat, RunReport, Simulator};
pub use crate::stats::PolicyStats;
pub use crate::trace::{load_trace, parse_line, read_trace};
pub use crate::traits::{Access, Operation, ReplacementPolicy};
