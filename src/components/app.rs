use super::game_view::GameView;
use yew::prelude::*;

/// Page shell: title, the game canvas, and the control hints.
#[function_component(App)]
pub fn app() -> Html {
    html! {
        <div style="min-height:100vh; display:flex; align-items:center; justify-content:center; background:linear-gradient(#38bdf8, #7dd3fc);">
            <div style="background:#fff; border-radius:8px; box-shadow:0 12px 32px rgba(0,0,0,0.35); padding:24px;">
                <h1 style="font-family:monospace; text-align:center; margin:0 0 16px 0; color:#1f2937;">
                    {"Minecraft Mini-Game"}
                </h1>
                <GameView />
                <div style="margin-top:16px; text-align:center; font-family:monospace; color:#374151;">
                    <p style="margin:4px 0; font-size:18px;">{"Move with "}<b>{"← → ↑"}</b>{" (or Space to jump)"}</p>
                    <p style="margin:4px 0;">{"Goal: drop into the hopper!"}</p>
                </div>
            </div>
        </div>
    }
}
