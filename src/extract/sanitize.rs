/// Characters stripped from user-supplied paths before they reach the
/// command builder. Defensive normalization only; the encoder is always
/// spawned with an argument vector, never a shell line.
const DANGEROUS: &str = "'\"`;|&$(){}[]<>\\";

/// Remove shell metacharacters from a path string, preserving the relative
/// order of everything else.
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|c| !DANGEROUS.contains(*c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_every_dangerous_character() {
        let input = "a'b\"c`d;e|f&g$h(i)j{k}l[m]n<o>p\\q";
        assert_eq!(sanitize(input), "abcdefghijklmnopq");
    }

    #[test]
    fn preserves_clean_paths() {
        let path = "/home/user/Videos/movie file-01.mp4";
        assert_eq!(sanitize(path), path);
    }

    #[test]
    fn preserves_order_of_remaining_characters() {
        assert_eq!(sanitize("x;y|z"), "xyz");
        assert_eq!(sanitize("$(rm -rf)/video.mp4"), "rm -rf/video.mp4");
    }

    #[test]
    fn empty_input() {
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn keeps_unicode_untouched() {
        assert_eq!(sanitize("视频文件.mp4"), "视频文件.mp4");
    }
}
