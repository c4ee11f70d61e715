// arg_utils.rs: small helpers for invocation-name and option parsing.

/// Returns the last path component of `path`, handling both `/` and `\` separators.
pub fn last_name_from_path(path: &str) -> &str {
    let after_slash = match path.rfind('/') {
        Some(pos) => &path[pos + 1..],
        None => path,
    };
    match after_slash.rfind('\\') {
        Some(pos) => &after_slash[pos + 1..],
        None => after_slash,
    }
}

/// Returns `true` if `exe_name` is `name`, ignoring any file extension.
///
/// The character right after `name` must be the end of the string or `'.'`.
pub fn exe_name_match(exe_name: &str, name: &str) -> bool {
    if let Some(rest) = exe_name.strip_prefix(name) {
        rest.is_empty() || rest.starts_with('.')
    } else {
        false
    }
}

/// Parses an unsigned 32-bit integer from the start of `s`, optionally
/// followed by a size suffix.
///
/// Returns `None` without leading digits or on overflow, otherwise
/// `Some((value, remainder))` with `remainder` the unconsumed tail.
///
/// Suffixes (case-sensitive): `K` / `KB` / `KiB` → ×1 024,
/// `M` / `MB` / `MiB` → ×1 048 576.
pub fn read_u32_from_str(s: &str) -> Option<(u32, &str)> {
    let bytes = s.as_bytes();
    let mut i = 0usize;

    if !matches!(bytes.first(), Some(b) if b.is_ascii_digit()) {
        return None;
    }

    let mut result: u32 = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        result = result.checked_mul(10)?.checked_add((bytes[i] - b'0') as u32)?;
        i += 1;
    }

    let shift = match bytes.get(i) {
        Some(b'K') => 10,
        Some(b'M') => 20,
        _ => 0,
    };
    if shift > 0 {
        if result.leading_zeros() < shift {
            return None;
        }
        result <<= shift;
        i += 1;
        if bytes.get(i) == Some(&b'i') {
            i += 1;
        }
        if bytes.get(i) == Some(&b'B') {
            i += 1;
        }
    }

    Some((result, &s[i..]))
}

/// If `arg` starts with `prefix`, returns what follows it.
pub fn long_command_w_arg<'a>(arg: &'a str, prefix: &str) -> Option<&'a str> {
    arg.strip_prefix(prefix)
}
