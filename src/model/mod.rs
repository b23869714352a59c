pub mod etc;
pub mod input;
pub mod project;
pub mod store;

pub use etc::EtcState;
pub use input::{FieldNotice, UnitField};
pub use project::{Project, TimerError, TimerTransition};
pub use store::{ProjectStore, StoreError};
