use std::path::Path;

use super::format::AudioFormat;

/// Build the ffmpeg argument vector for one extraction: input, video
/// disabled, overwrite allowed, the format's codec arguments, a bitrate
/// flag for profiles that take one, and the output path last. Paths are
/// expected to be sanitized by the caller.
pub fn build_args(
    input: &Path,
    output: &Path,
    format: AudioFormat,
    bitrate: &str,
) -> Vec<String> {
    let mut args = vec![
        "-i".to_string(),
        input.to_string_lossy().into_owned(),
        "-vn".to_string(),
        "-y".to_string(),
    ];

    args.extend(format.codec_args().iter().map(|s| s.to_string()));

    if format.accepts_bitrate() {
        args.push("-b:a".to_string());
        args.push(bitrate.to_string());
    }

    args.push(output.to_string_lossy().into_owned());
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args_for(format: AudioFormat) -> Vec<String> {
        build_args(
            &PathBuf::from("movie.mp4"),
            &PathBuf::from("movie.out"),
            format,
            "192k",
        )
    }

    #[test]
    fn mp3_argument_vector() {
        assert_eq!(
            args_for(AudioFormat::Mp3),
            [
                "-i",
                "movie.mp4",
                "-vn",
                "-y",
                "-c:a",
                "libmp3lame",
                "-b:a",
                "192k",
                "movie.out"
            ]
        );
    }

    #[test]
    fn lossless_formats_omit_bitrate() {
        for format in [AudioFormat::Wav, AudioFormat::Flac, AudioFormat::Aiff] {
            let args = args_for(format);
            assert!(!args.contains(&"-b:a".to_string()), "{format}");
        }
    }

    #[test]
    fn ogg_uses_quality_scale_instead_of_bitrate() {
        let args = args_for(AudioFormat::Ogg);
        assert!(args.windows(2).any(|w| w == ["-q:a", "6"]));
        assert!(!args.contains(&"-b:a".to_string()));
    }

    #[test]
    fn bitrate_flag_present_iff_profile_accepts_it() {
        for format in AudioFormat::ALL {
            let args = args_for(format);
            assert_eq!(
                args.contains(&"-b:a".to_string()),
                format.accepts_bitrate(),
                "{format}"
            );
        }
    }

    #[test]
    fn codec_args_appear_in_order() {
        for format in AudioFormat::ALL {
            let args = args_for(format);
            let expected: Vec<String> =
                format.codec_args().iter().map(|s| s.to_string()).collect();
            assert!(
                args.windows(expected.len()).any(|w| w == expected),
                "{format}"
            );
        }
    }

    #[test]
    fn output_path_comes_last_and_flags_present() {
        let args = args_for(AudioFormat::Wav);
        assert_eq!(args.first().map(String::as_str), Some("-i"));
        assert_eq!(args.last().map(String::as_str), Some("movie.out"));
        assert!(args.contains(&"-vn".to_string()));
        assert!(args.contains(&"-y".to_string()));
    }
}
