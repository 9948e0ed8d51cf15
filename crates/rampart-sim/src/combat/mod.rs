//! Pure combat math: damage calculation, target selection, and status
//! effect instantiation. Nothing here owns or removes entities; the
//! tick systems apply the results.

pub mod damage;
pub mod effects;
pub mod targeting;
