use chrono::{Days, Local, NaiveDate};
use serde_json::Value;

/// One parsed `calendarEntities` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEntry {
    pub entity_id: String,
    pub name: String,
}

impl CalendarEntry {
    /// Parses `entity_id` or `entity_id:display_name`, splitting on the first colon.
    ///
    /// Returns `None` for entries without an entity id.
    pub fn parse(raw: &str) -> Option<Self> {
        let (entity_id, name) = match raw.split_once(':') {
            Some((entity_id, name)) => (entity_id.trim(), name.trim()),
            None => (raw.trim(), ""),
        };

        if entity_id.is_empty() {
            return None;
        }

        let name = if name.is_empty() {
            display_name(entity_id)
        } else {
            name.to_string()
        };

        Some(Self {
            entity_id: entity_id.to_string(),
            name,
        })
    }

    /// Adds the `calendar` and `calendar_entity` keys to every event object.
    pub fn tag_events(&self, events: Vec<Value>) -> Vec<Value> {
        events
            .into_iter()
            .map(|mut event| {
                if let Some(object) = event.as_object_mut() {
                    object.insert("calendar".into(), Value::String(self.name.clone()));
                    object.insert(
                        "calendar_entity".into(),
                        Value::String(self.entity_id.clone()),
                    );
                }
                event
            })
            .collect()
    }
}

/// `calendar.work_shifts` becomes `Work Shifts`.
pub fn display_name(entity_id: &str) -> String {
    let name = entity_id.strip_prefix("calendar.").unwrap_or(entity_id);

    title_case(&name.replace('_', " "))
}

fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_is_letter = false;

    for c in text.chars() {
        if previous_is_letter {
            result.extend(c.to_lowercase());
        } else {
            result.extend(c.to_uppercase());
        }
        previous_is_letter = c.is_alphabetic();
    }

    result
}

/// Query window covering today and the following seven days, in hub date-time format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarWindow {
    pub start: String,
    pub end: String,
}

impl CalendarWindow {
    pub fn starting_on(date: NaiveDate) -> Self {
        let last = date.checked_add_days(Days::new(7)).unwrap_or(date);

        Self {
            start: format!("{}T00:00:00", date.format("%Y-%m-%d")),
            end: format!("{}T23:59:59", last.format("%Y-%m-%d")),
        }
    }

    /// Window anchored on the local date at call time.
    pub fn current() -> Self {
        Self::starting_on(Local::now().date_naive())
    }
}

/// Orders events by `start.dateTime`, else `start.date`; events with neither go first.
pub fn sort_events(events: &mut [Value]) {
    events.sort_by(|a, b| start_key(a).cmp(start_key(b)));
}

fn start_key(event: &Value) -> &str {
    let start = &event["start"];

    start["dateTime"]
        .as_str()
        .filter(|value| !value.is_empty())
        .or_else(|| start["date"].as_str())
        .unwrap_or("")
}
