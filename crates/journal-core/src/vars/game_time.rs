//! Game-time template formatting.

use crate::calendar::CalendarDate;

/// Substitute the game-time token vocabulary into a user template.
///
/// Tokens are replaced one vocabulary entry at a time, left to right, in a
/// single pass each; replacement text is never rescanned. The order below
/// is load-bearing: `%ri` must go before `%r`, `%mo`/`%md` before `%m`, and
/// `%sd` before `%s`, or the shorter token would eat the longer one's
/// prefix. Matching is case-sensitive (`%y` vs `%Y`). Unrecognized tokens
/// stay verbatim.
pub fn format_game_time(template: &str, date: &CalendarDate) -> String {
    let substitutions: [(&str, String); 15] = [
        ("%y", date.year.to_string()),
        ("%Y", date.long_year()),
        ("%lm", date.month.long_name().to_string()),
        ("%bm", date.month.birthsign().to_string()),
        ("%am", date.month.argonian_name().to_string()),
        ("%mo", date.month.number().to_string()),
        ("%md", date.month_day.to_string()),
        ("%sd", date.weekday.short_name().to_string()),
        ("%ld", date.weekday.long_name().to_string()),
        ("%wd", date.weekday.number().to_string()),
        ("%h", date.hour.to_string()),
        ("%m", date.minute.to_string()),
        ("%s", date.second.to_string()),
        ("%ri", date.day_index.to_string()),
        ("%r", date.raw.to_string()),
    ];

    let mut out = template.to_string();
    for (token, value) in &substitutions {
        out = out.replace(token, value);
    }
    out
}
