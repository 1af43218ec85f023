pub mod consumption;
pub mod device;
pub mod user;

pub use consumption::{Consumption, ConsumptionTable};
pub use device::SwitchState;
pub use user::{User, UserTable};

pub trait Table {
    /// The SQL statement to create the table
    fn create(&self) -> String;

    /// The SQL statement to dispose the table
    fn dispose(&self) -> String;
}
