//! Reactive layer projecting design model changes onto renderable surfaces.
//!
//! Both binders are re-run after every store notification. They touch
//! disjoint material attributes, so the passes may run in either order: the
//! region binder never overwrites a bound embroidery texture, and the
//! embroidery binder clones the current material (carrying whatever shading
//! the region binder applied) before extending it.

mod embroidery;
mod region;

pub use embroidery::EmbroideryBinder;
pub use region::RegionBinder;
