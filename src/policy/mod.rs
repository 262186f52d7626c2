pub mod arc;
pub mod larc;
pub mod lfu;
pub mod lru;
pub mod marc;
pub mod regime;

pub use arc::{ArcCache, ArcCore, MissKind};
pub use larc::LarcCache;
pub use lfu::LfuCache;
pub use lru::LruCache;
pub use marc::{MarcCache, WindowCounters};
pub use regime::{HitRates, Regime, Transition};
