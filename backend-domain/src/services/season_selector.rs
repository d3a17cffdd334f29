use chrono::NaiveDate;

use crate::entities::Season;

/// The season whose regular-season interval contains `today`, if any.
/// `None` means off-season.
pub fn select_current_season(seasons: Vec<Season>, today: NaiveDate) -> Option<Season> {
    seasons.into_iter().find(|season| season.contains(today))
}
