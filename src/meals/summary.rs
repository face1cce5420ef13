use serde::Serialize;

/// Totals and longest in-diet streak over a user's meals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_meals: usize,
    pub meals_on_diet: usize,
    pub meals_not_on_diet: usize,
    pub best_sequence_of_meals_in_diet: usize,
}

/// Summarizes a sequence of in-diet flags in the order given.
///
/// The streak is the longest run of consecutive `true` values; the input is
/// never reordered, so the caller decides what "consecutive" means.
pub fn summarize<I>(in_diet_flags: I) -> Summary
where
    I: IntoIterator<Item = bool>,
{
    let mut summary = Summary::default();
    let mut current = 0;

    for in_diet in in_diet_flags {
        summary.total_meals += 1;
        if in_diet {
            summary.meals_on_diet += 1;
            current += 1;
        } else {
            summary.meals_not_on_diet += 1;
            current = 0;
        }
        if current > summary.best_sequence_of_meals_in_diet {
            summary.best_sequence_of_meals_in_diet = current;
        }
    }

    summary
}
