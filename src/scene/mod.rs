use std::collections::BTreeMap;

use thiserror::Error;

use crate::geometry::shapes::Shape;
use crate::geometry::{AffineTransform, Transformable};

/// Errors from scene tree edits that would silently lose or invent nodes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("component {component:?} already has a shape named {name:?}")]
    DuplicateShape { component: String, name: String },
    #[error("component {component:?} has no shape named {name:?}")]
    UnknownShape { component: String, name: String },
    #[error("component {component:?} already has a child named {name:?}")]
    DuplicateChild { component: String, name: String },
    #[error("component {component:?} has no child named {name:?}")]
    UnknownChild { component: String, name: String },
}

/// A named node in the scene tree.
///
/// A component owns shapes expressed in its local coordinate space, a single
/// transform placing that space inside the parent's, and named child
/// components. World coordinates of any shape are obtained by composing
/// transforms from the root down to the owning node; the shapes themselves
/// stay untouched in local space.
///
/// Shapes and children are keyed by name in [`BTreeMap`]s, so iteration
/// order is deterministic regardless of insertion order.
///
/// # Examples
///
/// ```
/// use roversim::geometry::shapes::Line;
/// use roversim::geometry::translate;
/// use roversim::scene::Component;
/// use roversim::util::linalg::Vector2;
///
/// let mut arm = Component::new("arm");
/// arm.add_shape("bone", Line::new(Vector2::zero(), Vector2::new(0.0, 1.0)))
///     .unwrap();
/// arm.set_transform(translate(1.0, 0.0));
///
/// let mut body = Component::root();
/// body.add_child("left_arm", arm).unwrap();
/// assert!(body.child("left_arm").is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    name: String,
    transform: AffineTransform,
    shapes: BTreeMap<String, Shape>,
    children: BTreeMap<String, Component>,
}

impl Component {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: AffineTransform::identity(),
            shapes: BTreeMap::new(),
            children: BTreeMap::new(),
        }
    }

    /// A fresh unnamed tree root. Roots attached as children via
    /// [`add_child()`](Component::add_child) take the child key as their name.
    pub fn root() -> Self {
        Self::new("root")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transform(&self) -> &AffineTransform {
        &self.transform
    }

    /// Replaces this node's transform outright.
    pub fn set_transform(&mut self, transform: AffineTransform) -> &mut Self {
        self.transform = transform;
        self
    }

    /// Composes `transform` after this node's current transform.
    pub fn apply_transform(&mut self, transform: AffineTransform) -> &mut Self {
        self.transform = self.transform.compose_with(&transform);
        self
    }

    /// Adds a shape under a fresh name; adding twice under one name is
    /// almost certainly a logic bug, so it fails rather than overwriting.
    pub fn add_shape(
        &mut self,
        name: impl Into<String>,
        shape: impl Into<Shape>,
    ) -> Result<&mut Self, SceneError> {
        let name = name.into();
        if self.shapes.contains_key(&name) {
            return Err(SceneError::DuplicateShape {
                component: self.name.clone(),
                name,
            });
        }
        self.shapes.insert(name, shape.into());
        Ok(self)
    }

    /// Replaces an existing shape; the name must already be present.
    pub fn update_shape(
        &mut self,
        name: &str,
        shape: impl Into<Shape>,
    ) -> Result<&mut Self, SceneError> {
        match self.shapes.get_mut(name) {
            Some(slot) => {
                *slot = shape.into();
                Ok(self)
            }
            None => Err(SceneError::UnknownShape {
                component: self.name.clone(),
                name: name.to_string(),
            }),
        }
    }

    pub fn shape(&self, name: &str) -> Option<&Shape> {
        self.shapes.get(name)
    }

    /// Attaches a child under a fresh name. A child still carrying the
    /// default root name is renamed to its key so the tree reads sensibly.
    pub fn add_child(
        &mut self,
        name: impl Into<String>,
        mut child: Component,
    ) -> Result<&mut Self, SceneError> {
        let name = name.into();
        if self.children.contains_key(&name) {
            return Err(SceneError::DuplicateChild {
                component: self.name.clone(),
                name,
            });
        }
        if child.name == "root" {
            child.name = name.clone();
        }
        self.children.insert(name, child);
        Ok(self)
    }

    /// Replaces an existing child; the name must already be present.
    pub fn update_child(
        &mut self,
        name: &str,
        mut child: Component,
    ) -> Result<&mut Self, SceneError> {
        match self.children.get_mut(name) {
            Some(slot) => {
                if child.name == "root" {
                    child.name = name.to_string();
                }
                *slot = child;
                Ok(self)
            }
            None => Err(SceneError::UnknownChild {
                component: self.name.clone(),
                name: name.to_string(),
            }),
        }
    }

    pub fn child(&self, name: &str) -> Option<&Component> {
        self.children.get(name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Component> {
        self.children.get_mut(name)
    }

    pub fn shapes(&self) -> impl Iterator<Item = (&str, &Shape)> {
        self.shapes.iter().map(|(name, shape)| (name.as_str(), shape))
    }

    pub fn children(&self) -> impl Iterator<Item = (&str, &Component)> {
        self.children
            .iter()
            .map(|(name, child)| (name.as_str(), child))
    }

    /// All shapes of this subtree, each mapped into this node's parent space.
    ///
    /// Own shapes pass through this node's transform once; a descendant's
    /// shapes pass through every transform on the path down to it, root
    /// first. The iterator is lazy and borrows the tree, so it can be
    /// recreated after further edits to pick up the new state.
    pub fn shapes_in_world_coordinates(&self) -> Box<dyn Iterator<Item = Shape> + '_> {
        let own = self
            .shapes
            .values()
            .map(move |shape| self.transform.apply(shape));
        let descendants = self.children.values().flat_map(move |child| {
            child
                .shapes_in_world_coordinates()
                .map(move |shape| self.transform.apply(&shape))
        });
        Box::new(own.chain(descendants))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::shapes::{Line, Point, Rect};
    use crate::geometry::{rotate, scale, translate};
    use crate::util::linalg::Vector2;
    use crate::util::ApproxEq;
    use std::f64::consts::FRAC_PI_2;

    fn dot_at(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    // ==================== Key discipline ====================

    #[test]
    fn add_shape_rejects_duplicate_names() {
        let mut c = Component::new("body");
        c.add_shape("dot", dot_at(0.0, 0.0)).unwrap();
        assert_eq!(
            c.add_shape("dot", dot_at(1.0, 1.0)).unwrap_err(),
            SceneError::DuplicateShape {
                component: "body".to_string(),
                name: "dot".to_string()
            }
        );
    }

    #[test]
    fn update_shape_requires_existing_name() {
        let mut c = Component::new("body");
        assert_eq!(
            c.update_shape("dot", dot_at(0.0, 0.0)).unwrap_err(),
            SceneError::UnknownShape {
                component: "body".to_string(),
                name: "dot".to_string()
            }
        );
        c.add_shape("dot", dot_at(0.0, 0.0)).unwrap();
        c.update_shape("dot", dot_at(2.0, 2.0)).unwrap();
        assert_eq!(
            c.shape("dot").unwrap().vertices(),
            vec![Vector2::new(2.0, 2.0)]
        );
    }

    #[test]
    fn add_child_rejects_duplicate_names() {
        let mut c = Component::root();
        c.add_child("arm", Component::new("arm")).unwrap();
        assert_eq!(
            c.add_child("arm", Component::new("arm")).unwrap_err(),
            SceneError::DuplicateChild {
                component: "root".to_string(),
                name: "arm".to_string()
            }
        );
    }

    #[test]
    fn update_child_requires_existing_name() {
        let mut c = Component::root();
        assert_eq!(
            c.update_child("arm", Component::new("arm")).unwrap_err(),
            SceneError::UnknownChild {
                component: "root".to_string(),
                name: "arm".to_string()
            }
        );
    }

    #[test]
    fn root_named_children_take_their_key() {
        let mut c = Component::root();
        c.add_child("wheel", Component::root()).unwrap();
        assert_eq!(c.child("wheel").unwrap().name(), "wheel");
    }

    // ==================== Transforms ====================

    #[test]
    fn apply_transform_composes_after_current() {
        let mut c = Component::new("part");
        c.set_transform(translate(1.0, 0.0));
        c.apply_transform(scale(2.0));
        // translate first, then scale: (0, 0) -> (1, 0) -> (2, 0)
        assert_eq!(
            c.transform().apply(&Vector2::zero()),
            Vector2::new(2.0, 0.0)
        );
    }

    // ==================== World-coordinate traversal ====================

    #[test]
    fn own_shapes_pass_through_local_transform() {
        let mut c = Component::new("part");
        c.add_shape("dot", dot_at(1.0, 0.0)).unwrap();
        c.set_transform(rotate(FRAC_PI_2));
        let shapes: Vec<_> = c.shapes_in_world_coordinates().collect();
        assert_eq!(shapes.len(), 1);
        assert!(shapes[0].vertices()[0].approx_eq(&Vector2::new(0.0, 1.0), 1e-10));
    }

    #[test]
    fn nested_shapes_compose_root_to_leaf() {
        let mut child = Component::new("child");
        child.add_shape("dot", dot_at(0.0, 0.0)).unwrap();
        child.set_transform(translate(1.0, 0.0));

        let mut root = Component::root();
        root.set_transform(scale(2.0));
        root.add_child("child", child).unwrap();

        // Child space (0, 0) -> parent space (1, 0) -> world (2, 0).
        let shapes: Vec<_> = root.shapes_in_world_coordinates().collect();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].vertices(), vec![Vector2::new(2.0, 0.0)]);
    }

    #[test]
    fn traversal_is_restartable_and_sees_edits() {
        let mut root = Component::root();
        root.add_shape("line", Line::new(Vector2::zero(), Vector2::new(1.0, 0.0)))
            .unwrap();
        assert_eq!(root.shapes_in_world_coordinates().count(), 1);

        root.add_shape("box", Rect::centred(1.0, 1.0)).unwrap();
        assert_eq!(root.shapes_in_world_coordinates().count(), 2);
    }

    #[test]
    fn traversal_order_is_deterministic() {
        let mut root = Component::root();
        root.add_shape("b", dot_at(2.0, 0.0)).unwrap();
        root.add_shape("a", dot_at(1.0, 0.0)).unwrap();
        let first: Vec<_> = root
            .shapes_in_world_coordinates()
            .map(|s| s.vertices())
            .collect();
        let second: Vec<_> = root
            .shapes_in_world_coordinates()
            .map(|s| s.vertices())
            .collect();
        assert_eq!(first, second);
        // BTreeMap keys, so "a" before "b" regardless of insertion order.
        assert_eq!(first[0], vec![Vector2::new(1.0, 0.0)]);
    }
}
