//! The `Surface` capability trait: anything a ray can hit. A single
//! required method plus default-method conveniences, with a family of
//! blanket impls over the usual pointer/container wrappers so callers can
//! hand this crate `&T`, `Box<dyn Surface>`, `Rc<T>`, or `Arc<T>` equally.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::sync::Arc;

use crate::geometry::{Segment, Vector};

/// Structural surface identity. Plain value rather than pointer identity, so
/// surfaces can be copied, hashed, and compared across scene snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

pub trait Surface {
    fn id(&self) -> SurfaceId;

    /// The endpoints of this surface.
    fn segment(&self) -> Segment;

    /// Whether this surface may appear in a plan (a target the player
    /// intends to bounce off). Non-plannable surfaces still physically
    /// reflect or block rays; they just can't be aimed at deliberately.
    fn is_plannable(&self) -> bool;

    /// The unit normal: `segment().direction()` rotated 90 degrees
    /// counter-clockwise and normalized. Degenerate surfaces report the
    /// zero vector.
    fn normal(&self) -> Vector {
        self.segment()
            .direction()
            .rotate90_ccw()
            .normalized()
            .unwrap_or(Vector::ZERO)
    }

    /// Whether a ray travelling in `direction` strikes this surface's
    /// reflective side, i.e. is heading into the normal rather than away
    /// from it.
    fn can_reflect_from(&self, direction: Vector) -> bool {
        direction.dot(self.normal()) < 0.0
    }
}

impl<T: Surface + ?Sized> Surface for &T {
    fn id(&self) -> SurfaceId {
        (**self).id()
    }
    fn segment(&self) -> Segment {
        (**self).segment()
    }
    fn is_plannable(&self) -> bool {
        (**self).is_plannable()
    }
    fn normal(&self) -> Vector {
        (**self).normal()
    }
    fn can_reflect_from(&self, direction: Vector) -> bool {
        (**self).can_reflect_from(direction)
    }
}

impl<T: Surface + ?Sized> Surface for Box<T> {
    fn id(&self) -> SurfaceId {
        (**self).id()
    }
    fn segment(&self) -> Segment {
        (**self).segment()
    }
    fn is_plannable(&self) -> bool {
        (**self).is_plannable()
    }
}

impl<T: Surface + ?Sized> Surface for Rc<T> {
    fn id(&self) -> SurfaceId {
        (**self).id()
    }
    fn segment(&self) -> Segment {
        (**self).segment()
    }
    fn is_plannable(&self) -> bool {
        (**self).is_plannable()
    }
}

impl<T: Surface + ?Sized> Surface for Arc<T> {
    fn id(&self) -> SurfaceId {
        (**self).id()
    }
    fn segment(&self) -> Segment {
        (**self).segment()
    }
    fn is_plannable(&self) -> bool {
        (**self).is_plannable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Wall {
        id: u64,
        seg: Segment,
    }

    impl Surface for Wall {
        fn id(&self) -> SurfaceId {
            SurfaceId(self.id)
        }
        fn segment(&self) -> Segment {
            self.seg
        }
        fn is_plannable(&self) -> bool {
            false
        }
    }

    #[test]
    fn normal_is_unit_length() {
        let w = Wall { id: 1, seg: Segment::new(Vector::new(0.0, 0.0), Vector::new(3.0, 4.0)) };
        assert!((w.normal().length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn boxed_surface_forwards_to_inner() {
        let boxed: Box<dyn Surface> =
            Box::new(Wall { id: 7, seg: Segment::new(Vector::new(0.0, 0.0), Vector::new(1.0, 0.0)) });
        assert_eq!(boxed.id(), SurfaceId(7));
        assert!(!boxed.is_plannable());
    }

    #[test]
    fn can_reflect_from_checks_incoming_side() {
        let w = Wall { id: 1, seg: Segment::new(Vector::new(0.0, 0.0), Vector::new(1.0, 0.0)) };
        // normal points +y; a ray travelling straight down (-y) is incoming.
        assert!(w.can_reflect_from(Vector::new(0.0, -1.0)));
        assert!(!w.can_reflect_from(Vector::new(0.0, 1.0)));
    }
}
