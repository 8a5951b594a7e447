//! Lazy Ackermannization support.
//!
//! The abstraction table produced by Ackermannization and the model
//! constructor that validates an abstract model against function congruence.

pub mod congruence;
pub mod info;
pub mod model_constructor;

pub use congruence::{ArgValues, Congruence, CongruenceEntry, CongruenceTable, TableRow};
pub use info::{ACKR_PREFIX, AckrInfo};
pub use model_constructor::{
    CheckStatus, Conflict, ConflictPolicy, ModelConstructor, ModelConstructorConfig,
    ModelConstructorStats,
};
