mod action_id;
mod action_status;
mod action_type;
mod endpoint;
mod http_method;
mod payload;

pub use action_id::ActionId;
pub use action_status::ActionStatus;
pub use action_type::ActionType;
pub use endpoint::Endpoint;
pub use http_method::HttpMethod;
pub use payload::ActionPayload;
