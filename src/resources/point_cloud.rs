use instant::{Duration, Instant};

use crate::{
    config::{LoaderConfig, ParseMode},
    data_structures::point_cloud::PointCloud,
    error::{LoadError, Result},
    platform::with_timeout,
    resources::{AssetFetcher, Fetch},
};

/// Number of leading columns read from every CSV row (x, y, z).
const COMPONENTS: usize = 3;

/// Loads CSV point clouds through an injected [`Fetch`] capability.
pub struct PointCloudLoader<F = AssetFetcher> {
    fetcher: F,
    parse_mode: ParseMode,
    timeout: Option<Duration>,
}

impl<F: Fetch> PointCloudLoader<F> {
    pub fn new(fetcher: F, config: &LoaderConfig) -> Self {
        Self {
            fetcher,
            parse_mode: config.parse_mode,
            timeout: config.timeout,
        }
    }

    /// Fetch the CSV at `path` and parse it with [`parse_csv`].
    pub async fn point_cloud_from_csv(&self, path: &str) -> Result<PointCloud> {
        let start = Instant::now();
        let fetch = async {
            self.fetcher
                .fetch_text(path)
                .await
                .map_err(|source| LoadError::Fetch {
                    path: path.to_string(),
                    source,
                })
        };
        let text = with_timeout(path, self.timeout, fetch).await?;
        let cloud = parse_csv(&text, self.parse_mode)?;
        log::debug!(
            "Loaded {} points from {} in {:?}",
            cloud.len(),
            path,
            start.elapsed()
        );
        Ok(cloud)
    }
}

impl PointCloudLoader {
    pub fn from_config(config: &LoaderConfig) -> Self {
        Self::new(AssetFetcher::from_config(config), config)
    }
}

/// Parse CSV text into a flat point cloud.
///
/// The first line is a header and is skipped. Every other line contributes
/// the first three comma separated fields in order; additional columns are
/// ignored. Lines are split on `'\n'` only, a trailing `'\r'` ends up in the
/// last field.
///
/// In [`ParseMode::Lenient`] nothing fails: fields are read like JavaScript's
/// `parseFloat` and anything that is missing or has no numeric prefix becomes
/// `NaN`. That includes the empty line produced by a trailing newline, which
/// yields three `NaN`s.
///
/// In [`ParseMode::Strict`] blank lines are skipped and every one of the three
/// fields must be a finite number once surrounding whitespace is trimmed.
pub fn parse_csv(text: &str, mode: ParseMode) -> Result<PointCloud> {
    let mut positions = Vec::new();
    for (idx, line) in text.split('\n').enumerate().skip(1) {
        match mode {
            ParseMode::Lenient => {
                let mut fields = line.split(',');
                for _ in 0..COMPONENTS {
                    positions.push(fields.next().map_or(f32::NAN, parse_float_prefix));
                }
            }
            ParseMode::Strict => {
                if line.trim().is_empty() {
                    continue;
                }
                let mut fields = line.split(',');
                for column in 1..=COMPONENTS {
                    let field = fields.next().unwrap_or_default();
                    match field.trim().parse::<f32>() {
                        Ok(value) if value.is_finite() => positions.push(value),
                        _ => {
                            return Err(LoadError::Parse {
                                line: idx + 1,
                                column,
                                field: field.to_string(),
                            });
                        }
                    }
                }
            }
        }
    }
    Ok(PointCloud::new(positions))
}

/// Read the longest numeric prefix of `field`, the way `parseFloat` does.
///
/// Leading whitespace is skipped, `Infinity` is recognised with an optional
/// sign, and a field without any digits gives `NaN`.
pub fn parse_float_prefix(field: &str) -> f32 {
    let s = field.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f32::NEG_INFINITY
        } else {
            f32::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        // "1." is still a number, a lone "." is not
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return f32::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    // parseFloat works in double precision, narrow afterwards
    s[..end].parse::<f64>().map_or(f32::NAN, |v| v as f32)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
