mod model;
mod store;
mod transport;

pub use model::{
    DesignModel, EmbroideryFont, EmbroiderySpec, EmbroideryTarget, Material, Region,
    RegionAppearance, DEFAULT_COLOR,
};
pub use store::{DesignStore, Subscriber};
pub use transport::{to_transport, DesignTransport, TransportAppearance, TransportSpec};
