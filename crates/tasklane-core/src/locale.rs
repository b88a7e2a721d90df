use chrono::{
  DateTime,
  Datelike,
  FixedOffset,
  NaiveDate,
  NaiveDateTime,
  TimeZone,
  Timelike
};
use serde::{
  Deserialize,
  Serialize
};
use tasklane_shared::TaskPriority;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
)]
pub enum Locale {
  #[default]
  #[serde(rename = "ar-EG", alias = "ar")]
  ArEg,
  #[serde(rename = "en-US", alias = "en")]
  EnUs
}

impl Locale {
  pub fn parse(
    text: &str
  ) -> Option<Self> {
    match text
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "ar-eg" | "ar" => {
        Some(Self::ArEg)
      }
      | "en-us" | "en" => {
        Some(Self::EnUs)
      }
      | _ => None
    }
  }

  pub fn tag(self) -> &'static str {
    match self {
      | Self::ArEg => "ar-EG",
      | Self::EnUs => "en-US"
    }
  }

  pub fn labels(
    self
  ) -> &'static Labels {
    match self {
      | Self::ArEg => &AR_EG,
      | Self::EnUs => &EN_US
    }
  }
}

/// Every user-visible string, per
/// locale.
#[derive(Debug, PartialEq, Eq)]
pub struct Labels {
  pub dir:                 &'static str,
  pub app_title:           &'static str,
  pub add_task:            &'static str,
  pub priority_low:        &'static str,
  pub priority_medium:     &'static str,
  pub priority_high:       &'static str,
  pub no_tasks:            &'static str,
  pub loading:             &'static str,
  pub overdue:             &'static str,
  pub completed_badge:     &'static str,
  pub edit:                &'static str,
  pub complete:            &'static str,
  pub delete:              &'static str,
  pub created_on:          &'static str,
  pub due_on:              &'static str,
  pub completed_on:        &'static str,
  pub stats_active:        &'static str,
  pub stats_completed:     &'static str,
  pub stats_total:         &'static str,
  pub filter_all:          &'static str,
  pub filter_pending:      &'static str,
  pub filter_completed:    &'static str,
  pub sort_date_desc:      &'static str,
  pub sort_date_asc:       &'static str,
  pub sort_priority_desc:  &'static str,
  pub sort_priority_asc:   &'static str,
  pub sort_due_date:       &'static str,
  pub search_placeholder:  &'static str,
  pub modal_add_title:     &'static str,
  pub modal_edit_title:    &'static str,
  pub field_title:         &'static str,
  pub field_description:   &'static str,
  pub field_due_date:      &'static str,
  pub field_priority:      &'static str,
  pub field_tags:          &'static str,
  pub save:                &'static str,
  pub reset:               &'static str,
  pub close:               &'static str,
  pub confirm_delete:      &'static str,
  pub confirm_yes:         &'static str,
  pub confirm_no:          &'static str,
  pub msg_created:         &'static str,
  pub msg_updated:         &'static str,
  pub msg_deleted:         &'static str,
  pub msg_completed:       &'static str,
  pub msg_list_failed:     &'static str,
  pub msg_task_failed:     &'static str,
  pub msg_save_failed:     &'static str,
  pub msg_delete_failed:   &'static str,
  pub msg_complete_failed: &'static str
}

impl Labels {
  pub fn priority(
    &self,
    priority: TaskPriority
  ) -> &'static str {
    match priority {
      | TaskPriority::Low => {
        self.priority_low
      }
      | TaskPriority::Medium => {
        self.priority_medium
      }
      | TaskPriority::High => {
        self.priority_high
      }
    }
  }
}

pub static AR_EG: Labels = Labels {
  dir:                 "rtl",
  app_title:           "إدارة المهام",
  add_task:            "مهمة جديدة",
  priority_low:        "منخفضة",
  priority_medium:     "متوسطة",
  priority_high:       "عالية",
  no_tasks:            "لا توجد مهام",
  loading:             "جارٍ التحميل...",
  overdue:             "متأخرة",
  completed_badge:     "مكتملة",
  edit:                "تعديل",
  complete:            "إكمال",
  delete:              "حذف",
  created_on:          "تاريخ الإنشاء",
  due_on:              "تاريخ الاستحقاق",
  completed_on:        "تاريخ الإكمال",
  stats_active:        "المهام النشطة",
  stats_completed:     "المهام المكتملة",
  stats_total:         "إجمالي المهام",
  filter_all:          "الكل",
  filter_pending:      "المعلقة",
  filter_completed:    "المكتملة",
  sort_date_desc:      "الأحدث أولاً",
  sort_date_asc:       "الأقدم أولاً",
  sort_priority_desc:  "الأولوية: الأعلى أولاً",
  sort_priority_asc:   "الأولوية: الأدنى أولاً",
  sort_due_date:       "حسب تاريخ الاستحقاق",
  search_placeholder:  "ابحث في المهام...",
  modal_add_title:     "إضافة مهمة جديدة",
  modal_edit_title:    "تعديل المهمة",
  field_title:         "العنوان",
  field_description:   "الوصف",
  field_due_date:      "تاريخ الاستحقاق",
  field_priority:      "الأولوية",
  field_tags:          "الوسوم (مفصولة بفواصل)",
  save:                "حفظ",
  reset:               "إعادة تعيين",
  close:               "إغلاق",
  confirm_delete:      "هل أنت متأكد من حذف هذه المهمة؟",
  confirm_yes:         "نعم، احذف",
  confirm_no:          "إلغاء",
  msg_created:         "تمت إضافة المهمة بنجاح",
  msg_updated:         "تم تحديث المهمة بنجاح",
  msg_deleted:         "تم حذف المهمة بنجاح",
  msg_completed:       "تم إكمال المهمة بنجاح",
  msg_list_failed:     "حدث خطأ أثناء تحميل المهام",
  msg_task_failed:     "حدث خطأ أثناء تحميل بيانات المهمة",
  msg_save_failed:     "حدث خطأ أثناء حفظ المهمة",
  msg_delete_failed:   "حدث خطأ أثناء حذف المهمة",
  msg_complete_failed: "حدث خطأ أثناء إكمال المهمة"
};

pub static EN_US: Labels = Labels {
  dir:                 "ltr",
  app_title:           "Task Manager",
  add_task:            "New task",
  priority_low:        "Low",
  priority_medium:     "Medium",
  priority_high:       "High",
  no_tasks:            "No tasks",
  loading:             "Loading...",
  overdue:             "Overdue",
  completed_badge:     "Completed",
  edit:                "Edit",
  complete:            "Complete",
  delete:              "Delete",
  created_on:          "Created",
  due_on:              "Due",
  completed_on:        "Completed",
  stats_active:        "Active",
  stats_completed:     "Completed",
  stats_total:         "Total",
  filter_all:          "All",
  filter_pending:      "Pending",
  filter_completed:    "Completed",
  sort_date_desc:      "Newest first",
  sort_date_asc:       "Oldest first",
  sort_priority_desc:  "Priority: high to low",
  sort_priority_asc:   "Priority: low to high",
  sort_due_date:       "By due date",
  search_placeholder:  "Search tasks...",
  modal_add_title:     "Add a new task",
  modal_edit_title:    "Edit task",
  field_title:         "Title",
  field_description:   "Description",
  field_due_date:      "Due date",
  field_priority:      "Priority",
  field_tags:          "Tags (comma separated)",
  save:                "Save",
  reset:               "Reset",
  close:               "Close",
  confirm_delete:      "Are you sure you want to delete this task?",
  confirm_yes:         "Yes, delete",
  confirm_no:          "Cancel",
  msg_created:         "Task added",
  msg_updated:         "Task updated",
  msg_deleted:         "Task deleted",
  msg_completed:       "Task completed",
  msg_list_failed:     "Could not load tasks",
  msg_task_failed:     "Could not load the task",
  msg_save_failed:     "Could not save the task",
  msg_delete_failed:   "Could not delete the task",
  msg_complete_failed: "Could not complete the task"
};

const EN_MONTHS: [&str; 12] = [
  "Jan", "Feb", "Mar", "Apr", "May",
  "Jun", "Jul", "Aug", "Sep", "Oct",
  "Nov", "Dec"
];

// ar-EG uses the full month name for
// the abbreviated style too.
const AR_MONTHS: [&str; 12] = [
  "يناير",
  "فبراير",
  "مارس",
  "أبريل",
  "مايو",
  "يونيو",
  "يوليو",
  "أغسطس",
  "سبتمبر",
  "أكتوبر",
  "نوفمبر",
  "ديسمبر"
];

/// Parses the timestamp shapes the
/// backend hands out. Values without
/// an offset are wall-clock times in
/// `zone`, resolved with the zone's
/// rules on that date, so a due date
/// across a DST change keeps its own
/// offset. A wall-clock time skipped by
/// a DST gap does not parse.
pub fn parse_timestamp<Tz>(
  raw: &str,
  zone: Tz
) -> Option<DateTime<FixedOffset>>
where
  Tz: TimeZone
{
  let raw = raw.trim();
  if raw.is_empty() {
    return None;
  }

  if let Ok(parsed) =
    DateTime::parse_from_rfc3339(raw)
  {
    return Some(
      parsed
        .with_timezone(&zone)
        .fixed_offset()
    );
  }

  let naive = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M"
  ]
  .iter()
  .find_map(|format| {
    NaiveDateTime::parse_from_str(
      raw, format
    )
    .ok()
  })
  .or_else(|| {
    NaiveDate::parse_from_str(
      raw, "%Y-%m-%d"
    )
    .ok()
    .and_then(|date| {
      date.and_hms_opt(0, 0, 0)
    })
  })?;

  zone
    .from_local_datetime(&naive)
    .earliest()
    .map(|value| value.fixed_offset())
}

/// Formats a backend timestamp for
/// display, falling back to the raw
/// text when it cannot be parsed.
pub fn format_timestamp<Tz>(
  raw: &str,
  zone: Tz,
  locale: Locale
) -> String
where
  Tz: TimeZone
{
  match parse_timestamp(raw, zone) {
    | Some(parsed) => {
      format_datetime(&parsed, locale)
    }
    | None => raw.trim().to_string()
  }
}

/// Numeric year, abbreviated month,
/// numeric day, 2-digit hour:minute.
pub fn format_datetime(
  value: &DateTime<FixedOffset>,
  locale: Locale
) -> String {
  let (pm, hour) = value.hour12();
  let month =
    value.month0() as usize;
  match locale {
    | Locale::EnUs => {
      format!(
        "{} {}, {}, {:02}:{:02} {}",
        EN_MONTHS[month],
        value.day(),
        value.year(),
        hour,
        value.minute(),
        if pm { "PM" } else { "AM" }
      )
    }
    | Locale::ArEg => {
      let text = format!(
        "{} {} {}، {:02}:{:02} {}",
        value.day(),
        AR_MONTHS[month],
        value.year(),
        hour,
        value.minute(),
        if pm { "م" } else { "ص" }
      );
      arabic_indic_digits(&text)
    }
  }
}

pub fn arabic_indic_digits(
  text: &str
) -> String {
  text
    .chars()
    .map(|ch| match ch.to_digit(10) {
      | Some(digit) => {
        char::from_u32(0x0660 + digit)
          .unwrap_or(ch)
      }
      | None => ch
    })
    .collect()
}
