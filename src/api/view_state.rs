use std::cell::RefCell;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::core::{AffineTransform2D, BaseScales, DataExtent, ExtentSource, Viewport};
use crate::interaction::{AnimationState, AnnotationPoint, IdleExtendingTimer, PointerResolver};
use crate::render::ViewportRenderer;

pub(super) type RendererRef = Rc<RefCell<dyn ViewportRenderer>>;
pub(super) type WeakRendererRef = Weak<RefCell<dyn ViewportRenderer>>;

/// Base scales tagged with the inputs they were derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct CachedBaseScales {
    pub(super) extent: DataExtent,
    pub(super) viewport: Viewport,
    pub(super) base: BaseScales,
}

/// Geometry owned by the controller: surface, live transform, dataset.
pub(super) struct ViewModel {
    pub(super) viewport: Viewport,
    pub(super) transform: AffineTransform2D,
    pub(super) dataset: Option<Rc<dyn ExtentSource>>,
    pub(super) scale_cache: RefCell<Option<CachedBaseScales>>,
}

impl ViewModel {
    pub(super) fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            transform: AffineTransform2D::identity(),
            dataset: None,
            scale_cache: RefCell::new(None),
        }
    }

    pub(super) fn invalidate_scales(&self) {
        self.scale_cache.borrow_mut().take();
    }
}

/// Scheduling and collaborator state grouped apart from geometry.
pub(super) struct ViewRuntime {
    pub(super) renderers: IndexMap<String, WeakRendererRef>,
    pub(super) timer: IdleExtendingTimer,
    pub(super) animation: AnimationState,
    pub(super) pointer: PointerResolver,
    pub(super) annotations: SmallVec<[AnnotationPoint; 1]>,
}

impl ViewRuntime {
    pub(super) fn new(pointer: PointerResolver) -> Self {
        Self {
            renderers: IndexMap::new(),
            timer: IdleExtendingTimer::new(),
            animation: AnimationState::default(),
            pointer,
            annotations: SmallVec::new(),
        }
    }
}
