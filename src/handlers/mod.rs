mod gateway;
mod health;
mod invoke;
mod registration;
mod result;

pub use gateway::gateway as GatewayHandler;
pub use health::health as HealthHandler;
pub use invoke::invoke as InvokeHandler;
pub use registration::RegistrationHandler;
pub use result::{APIError, APIResult};
