use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};
use yew::prelude::*;

use crate::model::{
    BLOCK_SIZE, CANVAS_HEIGHT, CANVAS_WIDTH, GameAction, GameState, HOPPER_SIZE, HOPPER_X,
    HOPPER_Y, PLAYER_SIZE, terrain_height,
};
use crate::state::{GameKey, InputState};
use crate::util::clog;

const SKY_COLOR: &str = "#87CEEB";
const WIN_TEXT: &str = "YOU WIN!";

/// Physics runs at a nominal 60 Hz; the win text scrolls on its own
/// slower cadence.
const PHYSICS_TICK_MS: i32 = 16;
const SCROLL_TICK_MS: i32 = 30;

#[function_component(GameView)]
pub fn game_view() -> Html {
    let canvas_ref = use_node_ref();
    let game = use_reducer(GameState::new);
    let input = use_mut_ref(InputState::default);
    let draw_ref = use_mut_ref(|| None::<Rc<dyn Fn()>>);
    let game_ref = use_mut_ref(|| game.clone());

    // Effect: on each committed change, refresh the stored handle to the
    // latest state then redraw.
    {
        let game_ref = game_ref.clone();
        let current_handle = game.clone();
        let draw_ref_local = draw_ref.clone();
        let version = game.version;
        use_effect_with(version, move |_| {
            *game_ref.borrow_mut() = current_handle.clone();
            if let Some(f) = &*draw_ref_local.borrow() {
                f();
            }
            || ()
        });
    }
    // Effect: log the win once.
    {
        let won = game.has_won;
        use_effect_with(won, move |won| {
            if *won {
                clog("Hopper reached, run over");
            }
            || ()
        });
    }
    // Main mount effect (draw closure, key listeners, timers).
    {
        let canvas_ref = canvas_ref.clone();
        let input_setup = input.clone();
        let game_ref_setup = game_ref.clone();
        let draw_ref_setup = draw_ref.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("window");
            let canvas: HtmlCanvasElement = canvas_ref.cast::<HtmlCanvasElement>().expect("canvas");

            // Draw closure
            let draw_closure: Rc<dyn Fn()> = {
                let canvas = canvas.clone();
                let game_ref = game_ref_setup.clone();
                Rc::new(move || {
                    if !canvas.is_connected() {
                        return;
                    }
                    let ctx = match canvas.get_context("2d").ok().flatten() {
                        Some(c) => c.dyn_into::<CanvasRenderingContext2d>().unwrap(),
                        None => return,
                    };
                    let handle = game_ref.borrow();
                    let gs = (**handle).clone();
                    drop(handle);

                    ctx.set_fill_style_str(SKY_COLOR);
                    ctx.fill_rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT);

                    draw_terrain(&ctx);
                    draw_hopper(&ctx, HOPPER_X, HOPPER_Y);
                    if !gs.has_won {
                        draw_player(&ctx, gs.player.pos.x, gs.player.pos.y);
                    }
                    if gs.has_won {
                        draw_win_text(&ctx, gs.text_y);
                    }
                })
            };
            *draw_ref_setup.borrow_mut() = Some(draw_closure.clone());
            (draw_closure)();

            // Physics interval: sample held keys, dispatch one step.
            let physics_tick = {
                let game_ref_ct = game_ref_setup.clone();
                let input = input_setup.clone();
                Closure::wrap(Box::new(move || {
                    let handle = game_ref_ct.borrow().clone();
                    let sample = input.borrow().sample();
                    handle.dispatch(GameAction::Tick { input: sample });
                }) as Box<dyn FnMut()>)
            };
            let physics_tick_id = window
                .set_interval_with_callback_and_timeout_and_arguments_0(
                    physics_tick.as_ref().unchecked_ref(),
                    PHYSICS_TICK_MS,
                )
                .unwrap();
            // Scroll interval: a no-op in the reducer until the win.
            let scroll_tick = {
                let game_ref_ct = game_ref_setup.clone();
                Closure::wrap(Box::new(move || {
                    let handle = game_ref_ct.borrow().clone();
                    handle.dispatch(GameAction::ScrollTick);
                }) as Box<dyn FnMut()>)
            };
            let scroll_tick_id = window
                .set_interval_with_callback_and_timeout_and_arguments_0(
                    scroll_tick.as_ref().unchecked_ref(),
                    SCROLL_TICK_MS,
                )
                .unwrap();

            // Keyboard: default action is suppressed only for the four
            // recognized keys.
            let keydown_cb = {
                let input = input_setup.clone();
                Closure::wrap(Box::new(move |e: KeyboardEvent| {
                    if let Some(key) = GameKey::from_event(&e.key(), &e.code()) {
                        e.prevent_default();
                        input.borrow_mut().press(key);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref())
                .ok();
            let keyup_cb = {
                let input = input_setup.clone();
                Closure::wrap(Box::new(move |e: KeyboardEvent| {
                    if let Some(key) = GameKey::from_event(&e.key(), &e.code()) {
                        input.borrow_mut().release(key);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("keyup", keyup_cb.as_ref().unchecked_ref())
                .ok();

            // Cleanup
            let window_clone = window.clone();
            move || {
                let _ = window_clone.remove_event_listener_with_callback(
                    "keydown",
                    keydown_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "keyup",
                    keyup_cb.as_ref().unchecked_ref(),
                );
                window_clone.clear_interval_with_handle(physics_tick_id);
                window_clone.clear_interval_with_handle(scroll_tick_id);
                let _keep_alive = (&physics_tick, &scroll_tick, &keydown_cb, &keyup_cb);
            }
        });
    }

    html! {
        <canvas
            ref={canvas_ref}
            width={(CANVAS_WIDTH as u32).to_string()}
            height={(CANVAS_HEIGHT as u32).to_string()}
            style="border:4px solid #1f2937; border-radius:4px; display:block;"
        />
    }
}

/// Tile columns every block step across the canvas, stacked from the
/// terrain surface down to the bottom edge.
fn draw_terrain(ctx: &CanvasRenderingContext2d) {
    let mut x = 0.0;
    while x <= CANVAS_WIDTH {
        let mut y = terrain_height(x).floor();
        while y < CANVAS_HEIGHT {
            draw_grass_block(ctx, x, y);
            y += BLOCK_SIZE;
        }
        x += BLOCK_SIZE;
    }
}

fn draw_grass_block(ctx: &CanvasRenderingContext2d, x: f64, y: f64) {
    ctx.set_fill_style_str("#7CB342");
    ctx.fill_rect(x, y, BLOCK_SIZE, BLOCK_SIZE);
    ctx.set_stroke_style_str("#558B2F");
    ctx.set_line_width(1.0);
    ctx.stroke_rect(x, y, BLOCK_SIZE, BLOCK_SIZE);

    // Lighter grass cap on the surface block of the column.
    if y == terrain_height(x + BLOCK_SIZE / 2.0).floor() {
        ctx.set_fill_style_str("#4CAF50");
        ctx.fill_rect(x, y, BLOCK_SIZE, BLOCK_SIZE / 2.0);
    }
}

fn draw_player(ctx: &CanvasRenderingContext2d, x: f64, y: f64) {
    // Head
    ctx.set_fill_style_str("#F4A460");
    ctx.fill_rect(x + BLOCK_SIZE / 4.0, y, BLOCK_SIZE / 2.0, BLOCK_SIZE / 2.0);
    // Arms/torso
    ctx.set_fill_style_str("#7FB3D5");
    ctx.fill_rect(x, y + BLOCK_SIZE / 2.0, BLOCK_SIZE / 4.0, BLOCK_SIZE / 2.0);
    ctx.fill_rect(
        x + 3.0 * BLOCK_SIZE / 4.0,
        y + BLOCK_SIZE / 2.0,
        BLOCK_SIZE / 4.0,
        BLOCK_SIZE / 2.0,
    );
    // Legs
    ctx.set_fill_style_str("#FF6B6B");
    ctx.fill_rect(x, y + BLOCK_SIZE, BLOCK_SIZE / 4.0, BLOCK_SIZE / 2.0);
    ctx.fill_rect(
        x + 3.0 * BLOCK_SIZE / 4.0,
        y + BLOCK_SIZE,
        BLOCK_SIZE / 4.0,
        BLOCK_SIZE / 2.0,
    );
    // Eyes
    ctx.set_fill_style_str("#8B4513");
    ctx.fill_rect(x + 6.0, y + 6.0, 4.0, 4.0);
    ctx.fill_rect(x + 14.0, y + 6.0, 4.0, 4.0);

    ctx.set_stroke_style_str("#000");
    ctx.set_line_width(1.0);
    ctx.stroke_rect(x, y, PLAYER_SIZE, PLAYER_SIZE);
}

/// Two stacked trapezoids (body + spout) with a single outline around
/// the whole silhouette.
fn draw_hopper(ctx: &CanvasRenderingContext2d, x: f64, y: f64) {
    ctx.set_fill_style_str("#8B4513");
    ctx.begin_path();
    ctx.move_to(x, y);
    ctx.line_to(x + HOPPER_SIZE, y);
    ctx.line_to(x + HOPPER_SIZE - 6.0, y + 24.0);
    ctx.line_to(x + 6.0, y + 24.0);
    ctx.close_path();
    ctx.fill();

    ctx.set_fill_style_str("#654321");
    ctx.begin_path();
    ctx.move_to(x + 6.0, y + 24.0);
    ctx.line_to(x + HOPPER_SIZE - 6.0, y + 24.0);
    ctx.line_to(x + HOPPER_SIZE - 12.0, y + 40.0);
    ctx.line_to(x + 12.0, y + 40.0);
    ctx.close_path();
    ctx.fill();

    ctx.set_stroke_style_str("#000");
    ctx.set_line_width(2.0);
    ctx.begin_path();
    ctx.move_to(x, y);
    ctx.line_to(x + HOPPER_SIZE, y);
    ctx.line_to(x + HOPPER_SIZE - 6.0, y + 24.0);
    ctx.line_to(x + HOPPER_SIZE - 12.0, y + 40.0);
    ctx.line_to(x + 12.0, y + 40.0);
    ctx.line_to(x + 6.0, y + 24.0);
    ctx.close_path();
    ctx.stroke();
}

fn draw_win_text(ctx: &CanvasRenderingContext2d, text_y: f64) {
    ctx.save();
    ctx.set_font("bold 56px monospace");
    ctx.set_fill_style_str("#FFD700");
    ctx.set_stroke_style_str("#000");
    ctx.set_line_width(5.0);
    ctx.set_text_align("center");
    ctx.set_shadow_color("#000");
    ctx.set_shadow_blur(10.0);

    ctx.stroke_text(WIN_TEXT, CANVAS_WIDTH / 2.0, text_y).ok();
    ctx.fill_text(WIN_TEXT, CANVAS_WIDTH / 2.0, text_y).ok();
    ctx.restore();
}
