use bitflags::bitflags;
use glam::Vec2;

bitflags! {
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ClickFlags: u8 {
        const NONE         = 0x00;
        /// At least one column of the sprite survived the depth test.
        const VISIBLE      = 0x01;
        /// Can be removed by shooting it.
        const DESTRUCTIBLE = 0x02;
    }
}

/// Screen-space pick region of one sprite, rebuilt every frame.
///
/// `sprite_index` is a lookup key into the level's sprite list as it was
/// when the frame was cast; it goes stale as soon as a sprite is deleted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clickable {
    pub origin: Vec2,
    pub size: Vec2,
    sprite_index: Option<usize>,
    flags: ClickFlags,
}

impl Clickable {
    pub fn new(origin: Vec2, size: Vec2, sprite_index: usize) -> Self {
        Self {
            origin,
            size,
            sprite_index: Some(sprite_index),
            flags: ClickFlags::NONE,
        }
    }

    /// Half-open containment test: `origin <= p < origin + size`.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.origin + self.size;
        p.x >= self.origin.x && p.y >= self.origin.y && p.x < max.x && p.y < max.y
    }

    #[inline]
    pub fn visible(&self) -> bool {
        self.flags.contains(ClickFlags::VISIBLE)
    }

    #[inline]
    pub fn destructible(&self) -> bool {
        self.flags.contains(ClickFlags::DESTRUCTIBLE)
    }

    #[inline]
    pub fn sprite_index(&self) -> Option<usize> {
        self.sprite_index
    }

    #[inline]
    pub fn flags(&self) -> ClickFlags {
        self.flags
    }

    pub fn set_visible(&mut self, on: bool) {
        self.flags.set(ClickFlags::VISIBLE, on);
    }

    pub fn set_destructible(&mut self, on: bool) {
        self.flags.set(ClickFlags::DESTRUCTIBLE, on);
    }

    pub fn set_sprite_index(&mut self, index: Option<usize>) {
        self.sprite_index = index;
    }
}

/// Per-frame list of clickables in draw order (far to near).
#[derive(Default, Debug, Clone)]
pub struct ClickRegistry {
    items: Vec<Clickable>,
}

impl ClickRegistry {
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Append and return the slot so the caster can fill in flags.
    pub fn push(&mut self, c: Clickable) -> &mut Clickable {
        self.items.push(c);
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Clickable> + '_ {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Clickable] {
        &self.items
    }

    /// Nearest visible clickable under `point`.  Later entries were drawn
    /// over earlier ones, so the search runs back to front.
    pub fn topmost(&self, point: Vec2) -> Option<&Clickable> {
        self.items
            .iter()
            .rev()
            .find(|c| c.visible() && c.contains(point))
    }

    /// Like [`topmost`](Self::topmost) but only considers destructible
    /// entries.
    pub fn topmost_destructible_mut(&mut self, point: Vec2) -> Option<&mut Clickable> {
        self.items
            .iter_mut()
            .rev()
            .find(|c| c.destructible() && c.contains(point))
    }

    /// Sprite `removed` left the level: drop references to it and shift
    /// the indices that followed it.
    pub fn forget_sprite(&mut self, removed: usize) {
        for c in &mut self.items {
            match c.sprite_index {
                Some(i) if i == removed => {
                    c.sprite_index = None;
                    c.flags = ClickFlags::NONE;
                }
                Some(i) if i > removed => c.sprite_index = Some(i - 1),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    #[test]
    fn contains_is_half_open() {
        let c = Clickable::new(vec2(10.0, 20.0), vec2(5.0, 5.0), 0);
        assert!(c.contains(vec2(10.0, 20.0)));
        assert!(c.contains(vec2(14.9, 24.9)));
        assert!(!c.contains(vec2(15.0, 22.0)));
        assert!(!c.contains(vec2(9.9, 22.0)));
    }

    #[test]
    fn flag_setters() {
        let mut c = Clickable::new(Vec2::ZERO, Vec2::ONE, 3);
        assert!(!c.visible() && !c.destructible());
        c.set_visible(true);
        c.set_destructible(true);
        assert_eq!(c.flags(), ClickFlags::VISIBLE | ClickFlags::DESTRUCTIBLE);
        c.set_visible(false);
        assert!(!c.visible() && c.destructible());
        c.set_sprite_index(None);
        assert_eq!(c.sprite_index(), None);
    }

    #[test]
    fn registry_push_returns_slot() {
        let mut reg = ClickRegistry::default();
        reg.push(Clickable::new(Vec2::ZERO, Vec2::ONE, 7)).set_visible(true);
        assert_eq!(reg.len(), 1);
        assert!(reg.as_slice()[0].visible());
        reg.clear();
        assert!(reg.is_empty());
    }

    #[test]
    fn topmost_prefers_later_entries() {
        let mut reg = ClickRegistry::default();
        reg.push(Clickable::new(Vec2::ZERO, vec2(10.0, 10.0), 0)).set_visible(true);
        reg.push(Clickable::new(Vec2::ZERO, vec2(4.0, 4.0), 1)).set_visible(true);
        reg.push(Clickable::new(Vec2::ZERO, vec2(10.0, 10.0), 2));
        assert_eq!(reg.topmost(vec2(2.0, 2.0)).and_then(|c| c.sprite_index()), Some(1));
        assert_eq!(reg.topmost(vec2(8.0, 8.0)).and_then(|c| c.sprite_index()), Some(0));
        assert!(reg.topmost_destructible_mut(vec2(2.0, 2.0)).is_none());
    }

    #[test]
    fn forget_sprite_shifts_indices() {
        let mut reg = ClickRegistry::default();
        for i in 0..3 {
            let c = reg.push(Clickable::new(Vec2::ZERO, Vec2::ONE, i));
            c.set_visible(true);
            c.set_destructible(true);
        }
        reg.forget_sprite(1);
        let idx: Vec<_> = reg.iter().map(|c| c.sprite_index()).collect();
        assert_eq!(idx, vec![Some(0), None, Some(1)]);
        assert!(!reg.as_slice()[1].visible());
    }
}
