//! Argument-vector construction for each lens (§4.7). Each function returns
//! the program name and its argument list; spawning is handled by the caller.

use farlens_config::Config;

pub fn protocol_forwarding_argv(config: &Config) -> (&'static str, Vec<String>) {
    let conn = &config.connection;
    let app = &config.application;
    let mut args = vec!["client".to_string()];

    if conn.compression != "none" {
        args.push(format!("--compress={}", conn.compression));
    }
    args.push(format!("--video-codec={}", conn.video_codec));
    args.push("--ssh".to_string());
    args.push(format!("{}@{}", conn.ssh_user, conn.remote_host));
    args.push("--".to_string());
    args.push(app.executable.clone());
    args.extend(app.args.iter().cloned());

    ("waypipe", args)
}

pub fn video_high_motion_argv(config: &Config) -> (&'static str, Vec<String>) {
    let conn = &config.connection;
    let app = &config.application;
    let mut args = vec!["--host".to_string(), conn.remote_host.clone()];

    if conn.remote_port != 0 && conn.remote_port != 47989 {
        args.push("--port".to_string());
        args.push(conn.remote_port.to_string());
    }
    if config.performance.frame_rate > 0 {
        args.push("--fps".to_string());
        args.push(config.performance.frame_rate.to_string());
    }
    args.push("--codec".to_string());
    args.push(conn.video_codec.clone());
    args.push("--app".to_string());
    args.push(app.executable.clone());
    args.extend(app.args.iter().cloned());

    ("sunshine", args)
}

pub fn video_low_latency_decode_argv(config: &Config) -> (&'static str, Vec<String>) {
    let conn = &config.connection;
    let app = &config.application;
    let mut args = vec!["stream".to_string(), conn.remote_host.clone()];

    if conn.remote_port != 0 && conn.remote_port != 47984 {
        args.push("--port".to_string());
        args.push(conn.remote_port.to_string());
    }
    if config.performance.frame_rate > 0 {
        args.push("--fps".to_string());
        args.push(config.performance.frame_rate.to_string());
    }
    args.push("--codec".to_string());
    args.push(conn.video_codec.clone());
    args.push(app.executable.clone());
    args.extend(app.args.iter().cloned());

    ("moonlight", args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use farlens_config::{ApplicationConfig, ConnectionConfig};

    fn base_config() -> Config {
        Config {
            connection: ConnectionConfig {
                remote_host: "example.com".to_string(),
                remote_port: 22,
                ssh_user: "root".to_string(),
                ssh_key_path: None,
                compression: "lz4".to_string(),
                video_codec: "h264".to_string(),
                bandwidth_limit: 0,
            },
            application: ApplicationConfig {
                executable: "/usr/bin/mpv".to_string(),
                args: vec!["--fullscreen".to_string()],
                env: Default::default(),
                working_directory: None,
            },
            performance: Default::default(),
            observability: Default::default(),
            lens: Default::default(),
        }
    }

    #[test]
    fn test_protocol_forwarding_argv_layout() {
        let config = base_config();
        let (program, args) = protocol_forwarding_argv(&config);
        assert_eq!(program, "waypipe");
        assert_eq!(
            args,
            vec![
                "client",
                "--compress=lz4",
                "--video-codec=h264",
                "--ssh",
                "root@example.com",
                "--",
                "/usr/bin/mpv",
                "--fullscreen",
            ]
        );
    }

    #[test]
    fn test_high_motion_argv_omits_default_port() {
        let config = base_config();
        let (program, args) = video_high_motion_argv(&config);
        assert_eq!(program, "sunshine");
        assert!(!args.contains(&"--port".to_string()));
        assert!(args.contains(&"--host".to_string()));
    }

    #[test]
    fn test_high_motion_argv_includes_nondefault_port() {
        let mut config = base_config();
        config.connection.remote_port = 9999;
        let (_, args) = video_high_motion_argv(&config);
        assert!(args.windows(2).any(|w| w == ["--port", "9999"]));
    }

    #[test]
    fn test_low_latency_decode_argv_layout() {
        let config = base_config();
        let (program, args) = video_low_latency_decode_argv(&config);
        assert_eq!(program, "moonlight");
        assert_eq!(args[0], "stream");
        assert_eq!(args[1], "example.com");
        assert!(args.last().unwrap() == "--fullscreen");
    }
}
