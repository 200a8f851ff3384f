//! Crosshair picking and shooting against the clickables of the last frame.

use glam::Vec2;

use crate::{
    renderer::ClickRegistry,
    world::{Level, Sprite},
};

/// Sprite index under `point`, nearest first.
pub fn hovered(clickables: &ClickRegistry, point: Vec2) -> Option<usize> {
    clickables.topmost(point).and_then(|c| c.sprite_index())
}

/// Delete the nearest destructible sprite under `point`.
///
/// The hit clickable loses its flags and sprite index and the remaining
/// entries are re-keyed, so the registry stays usable until the next frame
/// rebuilds it.
pub fn shoot(clickables: &mut ClickRegistry, point: Vec2, level: &mut Level) -> Option<Sprite> {
    let hit = clickables.topmost_destructible_mut(point)?;
    let index = hit.sprite_index()?;
    hit.set_visible(false);
    hit.set_destructible(false);
    hit.set_sprite_index(None);

    let removed = level.delete_sprite(index);
    if removed.is_none() {
        log::warn!("clickable referenced missing sprite {index}");
    }
    clickables.forget_sprite(index);
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        renderer::{RendererExt, Scene, Software},
        world::{Camera, Grid, SpriteKind, TextureBank},
    };
    use glam::{dvec2, vec2};

    const W: usize = 64;
    const H: usize = 48;

    fn open_level(sprites: Vec<Sprite>) -> Level {
        let n = 16;
        let rows: Vec<Vec<u8>> = (0..n)
            .map(|x| {
                (0..n)
                    .map(|y| u8::from(x == 0 || y == 0 || x == n - 1 || y == n - 1))
                    .collect()
            })
            .collect();
        Level {
            grid: Grid::from_rows(&rows).unwrap(),
            sprites,
            start: Camera::looking(dvec2(2.5, 8.0), dvec2(1.0, 0.0), 0.66),
        }
    }

    fn frame(level: &Level, sw: &mut Software) {
        let bank = TextureBank::procedural(16);
        let scene = Scene {
            camera: &level.start,
            level,
            bank: &bank,
            highlight: None,
        };
        sw.render(W, H, &scene, |_, _, _| {});
    }

    fn centre() -> Vec2 {
        vec2(W as f32 / 2.0, H as f32 / 2.0)
    }

    #[test]
    fn hover_picks_nearest_sprite() {
        let level = open_level(vec![
            Sprite::new(10.5, 8.0, SpriteKind::BARREL_TEXTURE),
            Sprite::new(5.5, 8.0, SpriteKind::PILLAR_TEXTURE),
        ]);
        let mut sw = Software::default();
        frame(&level, &mut sw);
        assert_eq!(hovered(sw.clickables(), centre()), Some(1));
        assert_eq!(hovered(sw.clickables(), vec2(0.0, 0.0)), None);
    }

    #[test]
    fn shoot_removes_sprite_and_clears_clickable() {
        let mut level = open_level(vec![
            Sprite::new(10.5, 8.0, SpriteKind::BARREL_TEXTURE),
            Sprite::new(5.5, 8.0, SpriteKind::PILLAR_TEXTURE),
        ]);
        let mut sw = Software::default();
        frame(&level, &mut sw);

        let gone = shoot(sw.clickables_mut(), centre(), &mut level).unwrap();
        assert_eq!(gone.kind(), SpriteKind::Pillar);
        assert_eq!(level.sprites.len(), 1);

        // the barrel behind it is still addressable with its new index
        assert_eq!(hovered(sw.clickables(), centre()), Some(0));
        assert!(
            sw.clickables()
                .iter()
                .any(|c| c.sprite_index().is_none() && !c.visible() && !c.destructible())
        );
    }

    #[test]
    fn lights_cannot_be_shot() {
        let mut level = open_level(vec![Sprite::new(5.5, 8.0, SpriteKind::LIGHT_TEXTURE)]);
        let mut sw = Software::default();
        frame(&level, &mut sw);

        assert_eq!(hovered(sw.clickables(), centre()), Some(0));
        assert!(shoot(sw.clickables_mut(), centre(), &mut level).is_none());
        assert_eq!(level.sprites.len(), 1);
    }

    #[test]
    fn shooting_empty_space_is_a_no_op() {
        let mut level = open_level(vec![Sprite::new(5.5, 8.0, SpriteKind::BARREL_TEXTURE)]);
        let mut sw = Software::default();
        frame(&level, &mut sw);
        assert!(shoot(sw.clickables_mut(), vec2(1.0, 1.0), &mut level).is_none());
        assert_eq!(level.sprites.len(), 1);
    }
}
