/// Exit codes docker reports when a container dies from SIGINT, SIGKILL or SIGTERM.
pub const SIGNAL_EXIT_CODES: [i64; 3] = [130, 137, 143];

pub fn is_signal_exit(code: i64) -> bool {
    SIGNAL_EXIT_CODES.contains(&code)
}

/// Short human explanation for well known container exit codes.
pub fn explain_exit_code(code: i64) -> Option<&'static str> {
    match code {
        0 => Some("success"),
        126 => Some("contained command cannot be invoked"),
        127 => Some("contained command not found"),
        130 => Some("docker SIGINT"),
        137 => Some("docker SIGKILL"),
        143 => Some("docker SIGTERM"),
        _ => None,
    }
}
