use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use bevy::prelude::*;
use bevy_viewport_socket::{
    Console, DemoServer, GreetingHandler, ServerConfig, SocketConfig, SocketConnection,
    SocketPlugin,
};

#[derive(Default)]
struct RecordingConsole {
    lines: Mutex<Vec<String>>,
}

impl RecordingConsole {
    fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl Console for RecordingConsole {
    fn log(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}

fn update_until(app: &mut App, timeout: Duration, mut done: impl FnMut() -> bool) {
    let deadline = Instant::now() + timeout;
    while !done() {
        assert!(Instant::now() < deadline, "timed out driving the app");
        app.update();
        std::thread::sleep(Duration::from_millis(10));
    }
}

#[test]
fn greeting_is_sent_on_open_and_echo_is_logged() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime
        .block_on(DemoServer::bind(
            ServerConfig::default().with_bind_addr("127.0.0.1:0".parse().unwrap()),
        ))
        .unwrap();
    let addr = server.local_addr().unwrap();
    runtime.spawn(server.run());

    let config = SocketConfig::default().with_endpoint(format!("ws://{}/demo", addr));
    let console = Arc::new(RecordingConsole::default());
    let handler = GreetingHandler::new(config.greeting.clone()).with_console(console.clone());

    let mut app = App::new();
    app.add_plugins(SocketPlugin::without_handlers(config).with_handler(Arc::new(handler)));
    assert!(app.world().contains_resource::<SocketConnection>());

    update_until(&mut app, Duration::from_secs(5), || console.lines().len() >= 2);

    // Give any stray duplicate a chance to show up.
    for _ in 0..10 {
        app.update();
        std::thread::sleep(Duration::from_millis(10));
    }

    assert_eq!(console.lines(), vec!["Connected.", "Hello, World!"]);
}

#[test]
fn invalid_endpoint_leaves_app_without_connection() {
    let config = SocketConfig::default().with_endpoint("http://localhost:8000/demo");

    let mut app = App::new();
    app.add_plugins(SocketPlugin::new(config));
    app.update();

    assert!(!app.world().contains_resource::<SocketConnection>());
}
