//! Census module - the fixed descriptive-analysis sequence over the
//! adult census dataset
//!
//! Every step is a pure function over a loaded `DataFrame`;
//! `CensusReport::build` runs the whole sequence.

use std::path::Path;

use crate::frame::{
    crosstab, io, AggSpec, CsvOptions, DataFrame, FrameError, FrameResult, Value,
};

/// Canonical source of the dataset
pub const CENSUS_URL: &str =
    "https://archive.ics.uci.edu/ml/machine-learning-databases/adult/adult.data";

/// Column names of the headerless dataset, in file order
pub const CENSUS_COLUMNS: [&str; 15] = [
    "age",
    "workclass",
    "fnlwgt",
    "education",
    "education-num",
    "marital-status",
    "occupation",
    "relationship",
    "race",
    "sex",
    "capital-gain",
    "capital-loss",
    "hours-per-week",
    "native-country",
    "salary",
];

/// Education levels counted as higher education
pub const HIGHER_EDUCATION: [&str; 6] = [
    "Bachelors",
    "Prof-school",
    "Assoc-acdm",
    "Assoc-voc",
    "Masters",
    "Doctorate",
];

/// The high salary band marker
pub const HIGH_SALARY: &str = ">50K";

/// CSV options matching the dataset: headerless, `?` as NA, fields
/// padded with whitespace after the comma
#[must_use]
pub fn csv_options() -> CsvOptions {
    CsvOptions {
        has_header: false,
        column_names: Some(CENSUS_COLUMNS.iter().map(ToString::to_string).collect()),
        na_values: vec!["?".to_string()],
        trim: true,
    }
}

/// Load the dataset from a local file
///
/// # Errors
/// Returns error if the file cannot be read or parsed
pub fn load_census<P: AsRef<Path>>(path: P) -> FrameResult<DataFrame> {
    io::read_csv(path, &csv_options())
}

/// Fetch the dataset from its canonical URL
///
/// # Errors
/// Returns error on network failure or malformed data
pub fn fetch_census() -> FrameResult<DataFrame> {
    io::read_csv_url(CENSUS_URL, &csv_options())
}

/// Count of respondents per sex
pub fn sex_counts(df: &DataFrame) -> FrameResult<Vec<(String, usize)>> {
    df.value_counts("sex")
}

/// Mean age of men; None when the frame has no men
pub fn mean_age_of_men(df: &DataFrame) -> FrameResult<Option<f64>> {
    let men = df.filter(&df.column("sex")?.eq_str("Male"))?;
    Ok(men.column("age")?.mean()?.as_f64())
}

/// Share of respondents native to the United States, in [0, 1]
pub fn us_native_share(df: &DataFrame) -> FrameResult<f64> {
    if df.is_empty() {
        return Err(FrameError::EmptyData);
    }
    let natives = df
        .column("native-country")?
        .eq_str("United-States")
        .iter()
        .filter(|&&hit| hit)
        .count();
    Ok(natives as f64 / df.num_rows() as f64)
}

/// Mean and standard deviation of age per salary band
pub fn age_stats_by_salary(df: &DataFrame) -> FrameResult<DataFrame> {
    df.group_by(&["salary"])?.aggregate(&[
        AggSpec::mean("age", "mean_age"),
        AggSpec::std("age", "std_age"),
    ])
}

/// Whether every high earner has higher education, with the non-higher
/// education levels observed among high earners otherwise
pub fn high_earners_all_higher_educated(df: &DataFrame) -> FrameResult<(bool, Vec<String>)> {
    let high = df.filter(&df.column("salary")?.eq_str(HIGH_SALARY))?;
    let education = high.column("education")?;
    let mut other: Vec<String> = education
        .iter()
        .filter_map(|v| v.as_str().map(ToString::to_string))
        .filter(|level| !HIGHER_EDUCATION.contains(&level.as_str()))
        .collect();
    other.sort();
    other.dedup();
    Ok((other.is_empty(), other))
}

/// Age statistics per race and sex
pub fn age_stats_by_race_sex(df: &DataFrame) -> FrameResult<DataFrame> {
    df.group_by(&["race", "sex"])?.aggregate(&[
        AggSpec::count("count"),
        AggSpec::mean("age", "mean"),
        AggSpec::std("age", "std"),
        AggSpec::min("age", "min"),
        AggSpec::max("age", "max"),
    ])
}

/// Share of each salary band among married vs. single men
///
/// Marital status is bucketed by the `Married` prefix; the result is a
/// row-normalized contingency table.
pub fn high_earner_share_by_marital(df: &DataFrame) -> FrameResult<DataFrame> {
    let men = df.filter(&df.column("sex")?.eq_str("Male"))?;
    let buckets = men.column("marital-status")?.map_str("marital_category", |v| {
        v.as_str().map(|status| {
            if status.starts_with("Married") {
                "Married".to_string()
            } else {
                "Single".to_string()
            }
        })
    });
    let men = men.with_column(buckets)?;
    crosstab(&men, "marital_category", "salary", true)
}

/// Summary of the people working the maximum weekly hours
#[derive(Debug, Clone, PartialEq)]
pub struct MaxHoursSummary {
    /// The maximum hours-per-week value
    pub max_hours: i64,
    /// How many respondents work that much
    pub workers: usize,
    /// Share of high earners among them, in [0, 1]
    pub high_earner_share: f64,
}

/// Maximum weekly hours, who works that much, and the high-earner share
pub fn max_hours_summary(df: &DataFrame) -> FrameResult<MaxHoursSummary> {
    let hours = df.column("hours-per-week")?;
    let Value::Int(max_hours) = hours.max() else {
        return Err(FrameError::EmptyData);
    };
    let hardest = df.filter(&hours.eq_int(max_hours))?;
    let workers = hardest.num_rows();
    let high = hardest
        .column("salary")?
        .eq_str(HIGH_SALARY)
        .iter()
        .filter(|&&hit| hit)
        .count();
    Ok(MaxHoursSummary {
        max_hours,
        workers,
        high_earner_share: high as f64 / workers as f64,
    })
}

/// Mean weekly hours per native country and salary band
pub fn mean_hours_by_country_salary(df: &DataFrame) -> FrameResult<DataFrame> {
    df.group_by(&["native-country", "salary"])?
        .aggregate(&[AggSpec::mean("hours-per-week", "mean_hours")])
}

/// Age bucket label: (15, 35] young, (35, 70] adult, (70, 100] retiree
#[must_use]
pub fn age_group(age: i64) -> Option<&'static str> {
    match age {
        16..=35 => Some("young"),
        36..=70 => Some("adult"),
        71..=100 => Some("retiree"),
        _ => None,
    }
}

/// Add the derived `age-group` column
pub fn with_age_groups(df: &DataFrame) -> FrameResult<DataFrame> {
    let buckets = df.column("age")?.map_str("age-group", |v| {
        v.as_i64().and_then(age_group).map(ToString::to_string)
    });
    df.with_column(buckets)
}

/// Count of high earners per age bucket, ordered by descending count
pub fn high_earners_by_age_group(df: &DataFrame) -> FrameResult<Vec<(String, usize)>> {
    let df = with_age_groups(df)?;
    let high = df.filter(&df.column("salary")?.eq_str(HIGH_SALARY))?;
    high.value_counts("age-group")
}

/// Occupations whose mean age is at most 40 and whose minimum weekly
/// hours exceed 5, with surviving respondent counts
pub fn occupations_young_and_busy(df: &DataFrame) -> FrameResult<Vec<(String, usize)>> {
    let kept = df.group_by(&["occupation"])?.filter_groups(|group| {
        let mean_age = group.column("age")?.mean()?;
        let min_hours = group.column("hours-per-week")?.min();
        Ok(mean_age.as_f64().is_some_and(|m| m <= 40.0)
            && min_hours.as_f64().is_some_and(|h| h > 5.0))
    })?;
    kept.value_counts("occupation")
}

/// The whole fixed analysis sequence over one loaded frame
#[derive(Debug, Clone)]
pub struct CensusReport {
    pub sex_counts: Vec<(String, usize)>,
    pub mean_age_of_men: Option<f64>,
    pub us_native_share: f64,
    pub age_stats_by_salary: DataFrame,
    pub high_earners_all_higher_educated: bool,
    pub non_higher_education_levels: Vec<String>,
    pub age_stats_by_race_sex: DataFrame,
    pub high_earner_share_by_marital: DataFrame,
    pub max_hours: MaxHoursSummary,
    pub mean_hours_by_country_salary: DataFrame,
    pub high_earners_by_age_group: Vec<(String, usize)>,
    pub leading_age_group: Option<String>,
    pub busy_young_occupations: Vec<(String, usize)>,
}

impl CensusReport {
    /// Run every analysis step over the frame
    ///
    /// # Errors
    /// Returns error if the frame is missing expected columns or empty
    pub fn build(df: &DataFrame) -> FrameResult<Self> {
        let (all_higher, other_levels) = high_earners_all_higher_educated(df)?;
        let by_age_group = high_earners_by_age_group(df)?;
        let leading_age_group = by_age_group.first().map(|(group, _)| group.clone());
        Ok(Self {
            sex_counts: sex_counts(df)?,
            mean_age_of_men: mean_age_of_men(df)?,
            us_native_share: us_native_share(df)?,
            age_stats_by_salary: age_stats_by_salary(df)?,
            high_earners_all_higher_educated: all_higher,
            non_higher_education_levels: other_levels,
            age_stats_by_race_sex: age_stats_by_race_sex(df)?,
            high_earner_share_by_marital: high_earner_share_by_marital(df)?,
            max_hours: max_hours_summary(df)?,
            mean_hours_by_country_salary: mean_hours_by_country_salary(df)?,
            high_earners_by_age_group: by_age_group,
            leading_age_group,
            busy_young_occupations: occupations_young_and_busy(df)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::io::read_csv_from;
    use std::io::Cursor;

    const SAMPLE: &str = "\
25, Private, 100, Bachelors, 13, Never-married, Tech-support, Own-child, White, Male, 0, 0, 40, United-States, <=50K
45, Private, 200, Masters, 14, Married-civ-spouse, Exec-managerial, Husband, White, Male, 5000, 0, 60, United-States, >50K
38, ?, 150, HS-grad, 9, Married-civ-spouse, Sales, Husband, Black, Male, 0, 0, 99, United-States, >50K
30, Private, 120, Bachelors, 13, Never-married, Tech-support, Not-in-family, Asian-Pac-Islander, Female, 0, 0, 40, India, <=50K
50, Self-emp, 180, Doctorate, 16, Divorced, Prof-specialty, Unmarried, White, Female, 0, 0, 50, United-States, >50K
22, Private, 90, Some-college, 10, Never-married, Handlers-cleaners, Own-child, White, Male, 0, 0, 20, United-States, <=50K
80, Private, 80, HS-grad, 9, Widowed, Priv-house-serv, Not-in-family, White, Female, 0, 0, 10, United-States, <=50K
35, Private, 130, Assoc-voc, 11, Married-civ-spouse, Craft-repair, Husband, White, Male, 0, 0, 99, United-States, >50K
";

    fn sample_frame() -> DataFrame {
        read_csv_from(Cursor::new(SAMPLE), &csv_options()).unwrap()
    }

    #[test]
    fn test_loading_applies_na_and_trim() {
        let df = sample_frame();
        assert_eq!(df.num_rows(), 8);
        assert_eq!(df.columns().len(), 15);
        assert_eq!(df.column("workclass").unwrap().get(2).unwrap(), Value::Null);
        assert_eq!(
            df.column("salary").unwrap().get(0).unwrap(),
            Value::Str("<=50K".to_string())
        );
    }

    #[test]
    fn test_sex_counts() {
        let counts = sex_counts(&sample_frame()).unwrap();
        assert_eq!(
            counts,
            vec![("Male".to_string(), 5), ("Female".to_string(), 3)]
        );
    }

    #[test]
    fn test_mean_age_of_men() {
        let mean = mean_age_of_men(&sample_frame()).unwrap().unwrap();
        assert!((mean - 33.0).abs() < 1e-9);
    }

    #[test]
    fn test_us_native_share() {
        let share = us_native_share(&sample_frame()).unwrap();
        assert!((share - 0.875).abs() < 1e-9);
    }

    #[test]
    fn test_age_stats_by_salary() {
        let stats = age_stats_by_salary(&sample_frame()).unwrap();
        assert_eq!(stats.columns(), vec!["salary", "mean_age", "std_age"]);
        assert_eq!(stats.num_rows(), 2);
        // "<=50K" sorts before ">50K"
        let low_mean = stats.column("mean_age").unwrap().get(0).unwrap();
        assert_eq!(low_mean, Value::Float((25 + 30 + 22 + 80) as f64 / 4.0));
    }

    #[test]
    fn test_high_earner_education_check() {
        let (all_higher, other) = high_earners_all_higher_educated(&sample_frame()).unwrap();
        assert!(!all_higher);
        assert_eq!(other, vec!["HS-grad".to_string()]);
    }

    #[test]
    fn test_age_stats_by_race_sex() {
        let stats = age_stats_by_race_sex(&sample_frame()).unwrap();
        // Find (White, Female): max age 80
        let races = stats.column("race").unwrap();
        let sexes = stats.column("sex").unwrap();
        let maxes = stats.column("max").unwrap();
        let idx = (0..stats.num_rows())
            .find(|&i| {
                races.get(i).unwrap().as_str() == Some("White")
                    && sexes.get(i).unwrap().as_str() == Some("Female")
            })
            .unwrap();
        assert_eq!(maxes.get(idx).unwrap(), Value::Int(80));
    }

    #[test]
    fn test_marital_shares() {
        let table = high_earner_share_by_marital(&sample_frame()).unwrap();
        // Married men all earn >50K, single men never do
        assert_eq!(table.columns(), vec!["marital_category", "<=50K", ">50K"]);
        let married_high = table.column(">50K").unwrap().get(0).unwrap();
        let single_high = table.column(">50K").unwrap().get(1).unwrap();
        assert_eq!(married_high, Value::Float(1.0));
        assert_eq!(single_high, Value::Float(0.0));
    }

    #[test]
    fn test_max_hours_summary() {
        let summary = max_hours_summary(&sample_frame()).unwrap();
        assert_eq!(summary.max_hours, 99);
        assert_eq!(summary.workers, 2);
        assert!((summary.high_earner_share - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_age_group_bounds() {
        assert_eq!(age_group(15), None);
        assert_eq!(age_group(16), Some("young"));
        assert_eq!(age_group(35), Some("young"));
        assert_eq!(age_group(36), Some("adult"));
        assert_eq!(age_group(70), Some("adult"));
        assert_eq!(age_group(100), Some("retiree"));
        assert_eq!(age_group(101), None);
    }

    #[test]
    fn test_high_earners_by_age_group() {
        let counts = high_earners_by_age_group(&sample_frame()).unwrap();
        assert_eq!(
            counts,
            vec![("adult".to_string(), 3), ("young".to_string(), 1)]
        );
    }

    #[test]
    fn test_occupation_group_filter() {
        let counts = occupations_young_and_busy(&sample_frame()).unwrap();
        assert_eq!(counts[0], ("Tech-support".to_string(), 2));
        let names: Vec<&str> = counts.iter().map(|(n, _)| n.as_str()).collect();
        assert!(names.contains(&"Sales"));
        assert!(names.contains(&"Craft-repair"));
        assert!(names.contains(&"Handlers-cleaners"));
        assert!(!names.contains(&"Exec-managerial"));
        assert!(!names.contains(&"Priv-house-serv"));
    }

    #[test]
    fn test_full_report() {
        let report = CensusReport::build(&sample_frame()).unwrap();
        assert_eq!(report.leading_age_group.as_deref(), Some("adult"));
        assert_eq!(report.sex_counts.len(), 2);
        assert!(!report.high_earners_all_higher_educated);
        assert_eq!(report.mean_hours_by_country_salary.num_rows(), 3);
    }
}
