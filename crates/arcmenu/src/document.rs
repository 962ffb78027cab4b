use crate::geometry::Rect;
use strum::{Display, EnumIter};

/// Event listeners the controller installs while the menu is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Listener {
    /// Pointer movement over the overlay.
    PointerMove,
    /// Click on the overlay.
    PointerClick,
    /// Click anywhere in the document.
    DocumentClick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}

/// The element tree hosting the menu, and the source of its input events.
///
/// Subscriptions are explicit handles: whatever `subscribe` returns is handed back to
/// `unsubscribe` exactly once.
pub trait Document {
    type Node: Clone + PartialEq;
    type Subscription;

    /// Creates the hidden, invisible element that receives pointer input for the menu.
    fn create_overlay(&mut self) -> Self::Node;

    fn insert_overlay_before(&mut self, overlay: &Self::Node, target: &Self::Node);

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Current bounding box of `node`, or `None` while it has no layout.
    fn bounds(&self, node: &Self::Node) -> Option<Rect>;

    fn place_overlay(&mut self, overlay: &Self::Node, bounds: Rect);

    fn set_overlay_visible(&mut self, overlay: &Self::Node, visible: bool);

    fn set_cursor(&mut self, overlay: &Self::Node, cursor: Cursor);

    fn subscribe(&mut self, listener: Listener) -> Self::Subscription;

    fn unsubscribe(&mut self, subscription: Self::Subscription);
}
