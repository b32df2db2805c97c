// SPDX-License-Identifier: MPL-2.0
//! Scripted demo: builds an alert or a toast against the simulated engine
//! and prints every emitted lifecycle event.

use std::time::{Duration, Instant};

use overlay_kit::config;
use overlay_kit::engine::SimulatedEngine;
use overlay_kit::i18n::I18n;
use overlay_kit::overlay::{AlertOptions, Defaults, Overlays, ToastOptions};
use overlay_kit::theme::Severity;

fn subscribe_all(overlays: &mut Overlays<SimulatedEngine>) {
    let names = [
        "overlay:alert:created",
        "overlay:alert:rendered",
        "overlay:alert:ok",
        "overlay:alert:cancel",
        "overlay:alert:hidden",
        "overlay:alert:removed",
        "overlay:toast:created",
        "overlay:toast:rendered",
        "overlay:toast:show",
        "overlay:toast:shown",
        "overlay:toast:hide",
        "overlay:toast:hidden",
    ];
    for name in names {
        overlays.subscribe(name, |event| {
            println!("{}  (handle {})", event.name(), event.handle_id);
        });
    }
}

#[tokio::main]
async fn main() {
    let mut args = pico_args::Arguments::from_env();
    let lang: Option<String> = args.opt_value_from_str("--lang").unwrap();
    let demo: Option<String> = args.opt_value_from_str("--demo").unwrap();

    let config = config::load().unwrap_or_default();
    let i18n = I18n::new(lang, &config);
    let defaults = Defaults::from_config(&config);
    let mut overlays = Overlays::with_settings(SimulatedEngine::new(), i18n, defaults);
    subscribe_all(&mut overlays);

    match demo.as_deref().unwrap_or("toast") {
        "alert" => {
            let handle = overlays.alert(
                "Delete item?",
                AlertOptions::new()
                    .with_severity(Severity::Danger)
                    .with_ok_text("Delete")
                    .on_ok(|| println!("-- ok handler ran")),
            );
            overlays.pump();
            let ok = overlays
                .document()
                .descendant_with_class(handle.node, "btn-ok")
                .expect("alert renders an OK button");
            println!("-- clicking OK");
            overlays.activate(ok);
            overlays.pump();
        }
        _ => {
            overlays.toast(
                "Saved",
                ToastOptions::new()
                    .with_title("Done")
                    .with_severity(Severity::Success)
                    .with_timeout(300),
            );
            overlays.pump();
            // Let the auto-dismiss deadline pass, as a host event loop would.
            tokio::time::sleep(Duration::from_millis(350)).await;
            overlays.tick(Instant::now());
        }
    }
}
