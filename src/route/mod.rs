pub mod builder;
pub mod model;
pub mod naming;
pub mod schema;

pub use builder::{build_route_config, RouteConfig};
pub use model::{HttpMethod, ParamLocation, Parameter, ParsedRoute};
pub use naming::{build_route_name, ModuleConfig, RouteNameInfo};
