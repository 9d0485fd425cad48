use crate::error::CalcError;
use log::debug;

/// The fixed statistics vocabulary. Appearing as a call in an input routes
/// the whole input to this component.
pub const STATISTIC_FUNCTIONS: [&str; 5] = ["mean", "median", "mode", "stdev", "variance"];

/// Result of one statistics call, carrying the parsed input data.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsOutcome {
    pub operation: String,
    pub result: f64,
    pub data: Vec<f64>,
    pub count: usize,
}

/// Dispatcher cue: true when the input contains a call to one of the fixed
/// statistics function names.
pub fn contains_statistics_call(input: &str) -> bool {
    STATISTIC_FUNCTIONS.iter().any(|name| has_call(input, name))
}

fn has_call(input: &str, name: &str) -> bool {
    let bytes = input.as_bytes();
    let mut from = 0;
    while let Some(found) = input[from..].find(name) {
        let at = from + found;
        let end = at + name.len();
        let bounded = at == 0 || !is_name_char(bytes[at - 1]);
        if bounded && input[end..].trim_start().starts_with('(') {
            return true;
        }
        from = end;
    }
    false
}

fn is_name_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Evaluates a statistics call of the form `name([x, y, ...])`; the brackets
/// around the data list are optional. Anything else is a format error.
pub fn evaluate(input: &str) -> Result<StatisticsOutcome, CalcError> {
    let trimmed = input.trim();
    let open = trimmed.find('(').ok_or_else(|| {
        CalcError::StatisticsFormat("expected a statistics function call".to_string())
    })?;

    let name = trimmed[..open].trim();
    let rest = trimmed[open + 1..].trim_end();
    let inner = rest
        .strip_suffix(')')
        .ok_or_else(|| CalcError::StatisticsFormat("missing closing parenthesis".to_string()))?
        .trim();
    let inner = match inner.strip_prefix('[') {
        Some(bracketed) => bracketed
            .strip_suffix(']')
            .ok_or_else(|| CalcError::StatisticsFormat("unbalanced data brackets".to_string()))?,
        None => inner,
    };

    let data = parse_data_list(inner)?;
    let result = apply(name, &data)?;
    debug!("statistics {} over {} point(s): {}", name, data.len(), result);

    Ok(StatisticsOutcome {
        operation: format!("statistics_{}", name),
        result,
        count: data.len(),
        data,
    })
}

fn parse_data_list(inner: &str) -> Result<Vec<f64>, CalcError> {
    if inner.trim().is_empty() {
        return Err(CalcError::StatisticsFormat(
            "data list cannot be empty".to_string(),
        ));
    }

    inner
        .split(',')
        .map(|piece| {
            let piece = piece.trim();
            piece.parse::<f64>().map_err(|_| {
                CalcError::StatisticsFormat(format!("invalid number '{}' in data list", piece))
            })
        })
        .collect()
}

fn apply(name: &str, data: &[f64]) -> Result<f64, CalcError> {
    match name {
        "mean" => Ok(mean(data)),
        "median" => Ok(median(data)),
        "mode" => Ok(mode(data)),
        "stdev" => Ok(stdev(data)),
        "variance" => Ok(variance(data)),
        _ => Err(CalcError::StatisticsFormat(format!(
            "unknown statistics function '{}'",
            name
        ))),
    }
}

fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

fn median(data: &[f64]) -> f64 {
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    let middle = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[middle - 1] + sorted[middle]) / 2.0
    } else {
        sorted[middle]
    }
}

// Most frequent value; ties go to the value encountered first.
fn mode(data: &[f64]) -> f64 {
    let mut best = data[0];
    let mut best_count = 0;
    for &candidate in data {
        let count = data.iter().filter(|&&x| x == candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}

// Sample variance; a single data point has none, which reports as 0 rather
// than an error.
fn variance(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let center = mean(data);
    data.iter().map(|x| (x - center).powi(2)).sum::<f64>() / (data.len() - 1) as f64
}

fn stdev(data: &[f64]) -> f64 {
    variance(data).sqrt()
}
