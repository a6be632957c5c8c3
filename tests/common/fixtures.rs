//! Reusable env file contents

/// Complete production settings; the build writes `dist/production`.
pub const PRODUCTION_ENV: &str = r#"SERVER=deploy@example.com
REMOTE_DIR=/var/www/site
BUILD_COMMAND="mkdir -p dist/production/assets && echo '<html></html>' > dist/production/index.html && echo 'x' > dist/production/assets/app.js"
BACKUP_RETENTION=3
"#;

/// Settings without a build command, for `--skip-build` runs
pub const PREBUILT_ENV: &str = "SERVER=deploy@example.com\nREMOTE_DIR=/var/www/site\n";

/// Every key the loader knows, unset so the host environment cannot leak in
pub const CONFIG_KEYS: &[&str] = &[
    "SERVER",
    "REMOTE_DIR",
    "BUILD_COMMAND",
    "DIST_PATH",
    "BACKUP_RETENTION",
    "CONFIRM_DEFAULT",
];
