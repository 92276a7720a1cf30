mod table;

pub use table::{route_name, Route, RouteTable, RouteTableError, UnknownRouteError};
