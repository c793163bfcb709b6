// Process-level lifecycle: spawn the compiled binary and watch exit
// codes and operator output.

use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use tempfile::TempDir;

fn site_root() -> TempDir {
    let dir = tempfile::tempdir().expect("create temp site root");
    std::fs::write(dir.path().join("index.html"), "<h1>exported</h1>").expect("write index");
    dir
}

fn free_port() -> u16 {
    let placeholder = std::net::TcpListener::bind("127.0.0.1:0").expect("bind a free port");
    placeholder.local_addr().expect("listener addr").port()
}

fn spawn_server(root: &Path, port: u16) -> Child {
    Command::new(env!("CARGO_BIN_EXE_siteserve"))
        .env("SITESERVE_SERVER__HOST", "127.0.0.1")
        .env("SITESERVE_SERVER__PORT", port.to_string())
        .env("SITESERVE_SERVER__ROOT", root)
        .env("SITESERVE_LOGGING__ACCESS_LOG", "false")
        .env("SITESERVE_BROWSER__OPEN", "false")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn server binary")
}

/// Poll until the child exits. Bounded, so a hang fails the test instead
/// of wedging the suite.
fn wait_for_exit(child: &mut Child, deadline: Duration) -> std::process::ExitStatus {
    let start = Instant::now();
    while start.elapsed() < deadline {
        if let Some(status) = child.try_wait().expect("poll child") {
            return status;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    let _ = child.kill();
    panic!("server did not exit within {deadline:?}");
}

#[cfg(unix)]
fn wait_until_serving(port: u16, child: &mut Child) {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        if std::net::TcpStream::connect(("127.0.0.1", port)).is_ok() {
            return;
        }
        if let Some(status) = child.try_wait().expect("poll child") {
            panic!("server exited before listening: {status}");
        }
        assert!(Instant::now() < deadline, "server never started listening");
        std::thread::sleep(Duration::from_millis(20));
    }
}

#[test]
fn missing_root_exits_with_code_1() {
    let scratch = tempfile::tempdir().expect("scratch dir");
    let mut child = spawn_server(&scratch.path().join("never-built"), free_port());

    let status = wait_for_exit(&mut child, Duration::from_secs(10));
    assert_eq!(status.code(), Some(1));

    let output = child.wait_with_output().expect("collect output");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("not found"),
        "diagnostic must name the missing directory: {stderr}"
    );
}

#[test]
fn occupied_port_exits_with_code_1() {
    let root = site_root();
    let blocker = std::net::TcpListener::bind("127.0.0.1:0").expect("blocker bind");
    let port = blocker.local_addr().expect("blocker addr").port();

    let mut child = spawn_server(root.path(), port);

    let status = wait_for_exit(&mut child, Duration::from_secs(10));
    assert_eq!(status.code(), Some(1));

    let output = child.wait_with_output().expect("collect output");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains(&port.to_string()),
        "diagnostic must name the contested port: {stderr}"
    );
}

#[cfg(unix)]
#[test]
fn interrupt_exits_cleanly_with_a_goodbye() {
    let root = site_root();
    let port = free_port();
    let mut child = spawn_server(root.path(), port);
    wait_until_serving(port, &mut child);

    let delivered = Command::new("kill")
        .arg("-INT")
        .arg(child.id().to_string())
        .status()
        .expect("run kill");
    assert!(delivered.success(), "failed to signal the server");

    let status = wait_for_exit(&mut child, Duration::from_secs(10));
    assert_eq!(status.code(), Some(0));

    let output = child.wait_with_output().expect("collect output");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Server stopped. Goodbye!"),
        "missing goodbye line: {stdout}"
    );
}
