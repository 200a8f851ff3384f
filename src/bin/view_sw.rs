use anyhow::Context;
use clap::Parser;
use glam::vec2;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use casual_rs::{
    logging,
    renderer::{
        RendererExt, Scene, Software,
        present::{CROSSHAIR, CROSSHAIR_FIRING, Canvas, OUTLINE},
    },
    sim::{InputCmd, PlayState, TicRunner, interaction},
    world::{Level, TEXTURE_SIZE, TextureBank},
};

/// First-person grid raycaster.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Opts {
    /// Window width in pixels.
    #[arg(long, default_value_t = 960)]
    width: usize,
    /// Window height in pixels.
    #[arg(long, default_value_t = 600)]
    height: usize,
    /// Text level file; the built-in map is used when omitted.
    #[arg(long)]
    level: Option<PathBuf>,
    /// Frame-rate cap.
    #[arg(long, default_value_t = 60)]
    fps: usize,
    /// Debug logging.
    #[arg(short, long)]
    verbose: bool,
}

const MINIMAP_CELL: i32 = 4;

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    logging::init(opts.verbose);

    let level = match &opts.level {
        Some(path) => Level::from_file(path)
            .with_context(|| format!("loading level {}", path.display()))?,
        None => Level::default(),
    };
    let bank = TextureBank::procedural(TEXTURE_SIZE);
    for id in bank.missing(level.texture_ids()) {
        log::warn!("texture id {id} is not in the bank; drawing the checkerboard");
    }
    log::info!(
        "{}x{} grid, {} sprites, {} textures",
        level.grid.size(),
        level.grid.size(),
        level.sprites.len(),
        bank.len()
    );

    let mut play = PlayState::new(level);
    let mut sim = TicRunner::new();
    let mut renderer = Software::new(opts.width, opts.height);
    let mut canvas = Canvas::default();

    let mut win = Window::new(
        "casual_rs",
        opts.width,
        opts.height,
        WindowOptions::default(),
    )?;
    win.set_target_fps(opts.fps);

    let crosshair = vec2(opts.width as f32 / 2.0, opts.height as f32 / 2.0);
    let mut last_mouse_x: Option<f32> = None;
    // input not yet seen by a tic; frames without a tic must not lose it
    let mut pending = InputCmd::default();
    let mut show_map = false;

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now();

        /* --------------- build one InputCmd per frame --------------------- */
        let mut cmd = InputCmd::default();
        if win.is_key_down(Key::Up) || win.is_key_down(Key::W) {
            cmd.forward += 1.0;
        }
        if win.is_key_down(Key::Down) || win.is_key_down(Key::S) {
            cmd.forward -= 1.0;
        }
        if win.is_key_down(Key::Left) || win.is_key_down(Key::A) {
            cmd.strafe -= 1.0;
        }
        if win.is_key_down(Key::Right) || win.is_key_down(Key::D) {
            cmd.strafe += 1.0;
        }
        if let Some((mx, _)) = win.get_mouse_pos(MouseMode::Pass) {
            if let Some(prev) = last_mouse_x {
                cmd.look = (mx - prev) as f64;
            }
            last_mouse_x = Some(mx);
        }
        cmd.fire = win.get_mouse_down(MouseButton::Left)
            || win.is_key_pressed(Key::Space, KeyRepeat::No)
            || win.is_key_pressed(Key::LeftCtrl, KeyRepeat::No);
        if win.is_key_pressed(Key::M, KeyRepeat::No) {
            show_map = !show_map;
        }

        /* --------------- simulation ---------------------------------------- */
        pending.accumulate(&cmd);
        let mut fired = false;
        sim.pump(|dt| {
            fired |= play.step(&pending, dt);
            pending.consume();
        });
        if fired {
            let clicks = renderer.clickables_mut();
            if let Some(s) = play.shoot(clicks, crosshair) {
                log::debug!("hit {:?} at ({:.1}, {:.1})", s.kind(), s.pos.x, s.pos.y);
            }
        }

        /* --------------- draw ---------------------------------------------- */
        let highlight = interaction::hovered(renderer.clickables(), crosshair);
        let scene = Scene {
            camera: &play.camera,
            level: &play.level,
            bank: &bank,
            highlight,
        };
        renderer.render(opts.width, opts.height, &scene, |fb, w, h| {
            canvas.load_rgb(fb, w, h)
        });

        if let Some(c) = renderer.clickables().topmost(crosshair) {
            canvas.outline_clickable(c, OUTLINE);
        }
        let colour = if play.weapon.is_firing() {
            CROSSHAIR_FIRING
        } else {
            CROSSHAIR
        };
        canvas.crosshair(6, colour);
        if show_map {
            canvas.minimap(
                &play.level.grid,
                &play.level.sprites,
                &play.camera,
                MINIMAP_CELL,
            );
        }

        acc_time += t0.elapsed();
        acc_frames += 1;
        win.update_with_buffer(canvas.as_slice(), canvas.width(), canvas.height())?;

        // ─────────── report every ~3 s ─────────────────────────────────────
        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            log::info!("avg render: {:.2} ms  ({:.1} FPS)", avg_ms, 1000.0 / avg_ms);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
