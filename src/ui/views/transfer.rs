use std::time::Duration;

pub fn format_bytes_compact(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    let b = bytes as f64;
    if b < KB {
        return format!("{} B", bytes);
    }
    if b < MB {
        return format!("{:.1} KB", b / KB);
    }
    if b < GB {
        return format!("{:.1} MB", b / MB);
    }
    format!("{:.1} GB", b / GB)
}

pub fn format_elapsed(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        return format!("{:.1}s", secs);
    }
    let whole = d.as_secs();
    format!("{}m {:02}s", whole / 60, whole % 60)
}
