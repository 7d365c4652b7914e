use std::io::ErrorKind;
use std::net::TcpListener;

/// Admin key used by mock-server tests; never valid against the real API.
pub const TEST_ADMIN_KEY: &str = "sk-admin-test";

/// Returns true when mock-server tests cannot run because loopback sockets
/// are blocked (sandboxed CI). Any other bind failure is a real problem.
pub fn should_skip_httpmock() -> bool {
    match TcpListener::bind(("127.0.0.1", 0)) {
        Ok(_) => false,
        Err(err) if err.kind() == ErrorKind::PermissionDenied => {
            eprintln!("skipping mock server test: loopback bind denied");
            true
        }
        Err(err) => panic!("unexpected loopback bind failure: {err}"),
    }
}
