use ar_placement_engine::engine::core::app_setup::create_app;

fn main() {
    println!("=== AR PLACEMENT ENGINE ===");
    println!("Target: {}", std::env::consts::ARCH);

    let mut app = create_app();

    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(async move {
            app.run();
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.run();
    }
}
