use crate::models::job::JobPosting;

/// Jobs whose title contains any of the candidate's skill tags,
/// case-insensitively, in their original order.
///
/// Tags are matched as given, surrounding spaces included. Whitespace-only
/// tags match nothing, so an empty or blank skill set yields no jobs.
pub fn match_jobs<'a, S: AsRef<str>>(skills: &[S], jobs: &'a [JobPosting]) -> Vec<&'a JobPosting> {
    let needles: Vec<String> = skills
        .iter()
        .filter_map(|s| {
            let tag: &str = s.as_ref();
            (!tag.trim().is_empty()).then(|| tag.to_lowercase())
        })
        .collect();
    if needles.is_empty() {
        return Vec::new();
    }

    jobs.iter()
        .filter(|job| {
            let title = job.title.to_lowercase();
            needles.iter().any(|n| title.contains(n.as_str()))
        })
        .collect()
}
