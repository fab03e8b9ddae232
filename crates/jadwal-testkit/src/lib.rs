// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use jadwal_core::{Alignment, BadgeVariant, Column, ColumnWidth, Locale, RenderedCell};
use std::path::PathBuf;
use time::{Date, Month};

const MEMBER_NAMES: [&str; 50] = [
    "Ahmed Al-Mansour",
    "Fatima Hassan",
    "Mohammed Youssef",
    "Sarah Abdullah",
    "Omar Ibrahim",
    "Layla Al-Farsi",
    "Khalid Rahman",
    "Aisha Al-Zahrani",
    "Hassan Al-Tamimi",
    "Mariam Al-Qasimi",
    "Abdullah Al-Suwaidi",
    "Noor Al-Hashimi",
    "Ali Al-Mazrouei",
    "Huda Al-Amiri",
    "Youssef Al-Ketbi",
    "Zahra Al-Muhairi",
    "Ibrahim Al-Dhaheri",
    "Amina Al-Shehhi",
    "Saeed Al-Rumaithi",
    "Mona Al-Kaabi",
    "Rashid Al-Shamsi",
    "Latifa Al-Marri",
    "Sultan Al-Nuaimi",
    "Noura Al-Maktoum",
    "Hamad Al-Thani",
    "Reem Al-Fahim",
    "Majid Al-Awadhi",
    "Salma Al-Blooshi",
    "Tariq Al-Mulla",
    "Hessa Al-Falasi",
    "Faisal Al-Ghurair",
    "Maryam Al-Otaiba",
    "Saif Al-Mazrui",
    "Shamma Al-Bastaki",
    "Nasser Al-Suwaidi",
    "Jawaher Al-Qasim",
    "Khalifa Al-Zaabi",
    "Ayesha Al-Mansoori",
    "Rashad Al-Ahbabi",
    "Maitha Al-Shamsi",
    "Abdulla Al-Madani",
    "Sheikha Al-Tunaiji",
    "Hamdan Al-Mheiri",
    "Nouf Al-Marzouqi",
    "Salem Al-Naqbi",
    "Wadha Al-Dhahiri",
    "Obaid Al-Ketbi",
    "Moza Al-Katheeri",
    "Saif Al-Maamari",
    "Shamsa Al-Habsi",
];

const DEPARTMENTS: [(&str, &str); 10] = [
    ("Engineering", "هندسة"),
    ("Marketing", "تسويق"),
    ("Sales", "مبيعات"),
    ("HR", "موارد بشرية"),
    ("Finance", "مالية"),
    ("Operations", "عمليات"),
    ("Customer Support", "دعم العملاء"),
    ("Product", "منتج"),
    ("Design", "تصميم"),
    ("Legal", "قانوني"),
];

const FIRST_NAMES: [&str; 12] = [
    "Yara", "Karim", "Dana", "Fadi", "Rania", "Samir", "Lina", "Bassam", "Hala", "Nabil", "Salwa",
    "Ziad",
];
const FIRST_NAMES_AR: [&str; 12] = [
    "يارا", "كريم", "دانة", "فادي", "رانيا", "سمير", "لينا", "بسام", "هالة", "نبيل", "سلوى", "زياد",
];
const LAST_NAMES: [&str; 10] = [
    "Haddad", "Khoury", "Nasr", "Saleh", "Aziz", "Bakr", "Darwish", "Farah", "Ghanem", "Jaber",
];

const REFERENCE_YEAR: i32 = 2024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Editor,
    User,
    Viewer,
}

impl Role {
    pub const ALL: [Self; 4] = [Self::Admin, Self::Editor, Self::User, Self::Viewer];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Editor => "Editor",
            Self::User => "User",
            Self::Viewer => "Viewer",
        }
    }

    pub const fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (_, Locale::En) => self.as_str(),
            (Self::Admin, Locale::Ar) => "مدير",
            (Self::Editor, Locale::Ar) => "محرر",
            (Self::User, Locale::Ar) => "مستخدم",
            (Self::Viewer, Locale::Ar) => "مشاهد",
        }
    }

    pub const fn badge(self) -> BadgeVariant {
        match self {
            Self::Admin => BadgeVariant::Default,
            Self::Editor => BadgeVariant::Secondary,
            Self::User | Self::Viewer => BadgeVariant::Outline,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Active,
    Inactive,
    Pending,
}

impl Status {
    pub const ALL: [Self; 3] = [Self::Active, Self::Inactive, Self::Pending];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Pending => "Pending",
        }
    }

    pub const fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (_, Locale::En) => self.as_str(),
            (Self::Active, Locale::Ar) => "نشط",
            (Self::Inactive, Locale::Ar) => "غير نشط",
            (Self::Pending, Locale::Ar) => "قيد الانتظار",
        }
    }

    pub const fn badge(self) -> BadgeVariant {
        match self {
            Self::Active => BadgeVariant::Default,
            Self::Pending => BadgeVariant::Secondary,
            Self::Inactive => BadgeVariant::Outline,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: Status,
    pub department: String,
    pub department_ar: String,
    pub join_date: Date,
    pub last_active: Date,
}

impl Member {
    pub fn department_label(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.department,
            Locale::Ar => &self.department_ar,
        }
    }
}

/// The fixed 50-member directory used by the showcase.
pub fn member_directory() -> Vec<Member> {
    MEMBER_NAMES
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let (department, department_ar) = DEPARTMENTS[index % DEPARTMENTS.len()];
            let status = if index < 5 {
                Status::Pending
            } else {
                Status::ALL[index % Status::ALL.len()]
            };
            Member {
                id: format!("user-{}", index + 1),
                name: (*name).to_owned(),
                email: email_for(name),
                role: Role::ALL[index % Role::ALL.len()],
                status,
                department: department.to_owned(),
                department_ar: department_ar.to_owned(),
                join_date: calendar_date(REFERENCE_YEAR, index % 12, (index % 27) + 1),
                last_active: calendar_date(REFERENCE_YEAR + 1, 10, (index % 7) + 1),
            }
        })
        .collect()
}

/// Columns for a member table, labelled and rendered for `locale`.
pub fn member_columns(locale: Locale) -> Vec<Column<Member>> {
    vec![
        Column::new("name", "Name")
            .header_localized("الاسم")
            .accessor(|member: &Member| member.name.clone())
            .renderer(|member: &Member| RenderedCell::strong(member.name.clone()))
            .sortable(true)
            .width(ColumnWidth::Flex(3)),
        Column::new("email", "Email")
            .header_localized("البريد الإلكتروني")
            .accessor(|member: &Member| member.email.clone())
            .renderer(|member: &Member| RenderedCell::muted(member.email.clone()))
            .sortable(true)
            .width(ColumnWidth::Flex(4)),
        Column::new("role", "Role")
            .header_localized("الدور")
            .accessor(|member: &Member| member.role.as_str())
            .renderer(move |member: &Member| {
                RenderedCell::badge(member.role.label(locale), member.role.badge())
            })
            .sortable(true)
            .width(ColumnWidth::Fixed(10)),
        Column::new("status", "Status")
            .header_localized("الحالة")
            .accessor(|member: &Member| member.status.as_str())
            .renderer(move |member: &Member| {
                RenderedCell::badge(member.status.label(locale), member.status.badge())
            })
            .sortable(true)
            .width(ColumnWidth::Fixed(14)),
        Column::new("department", "Department")
            .header_localized("القسم")
            .accessor(|member: &Member| member.department.clone())
            .renderer(move |member: &Member| {
                RenderedCell::plain(member.department_label(locale).to_owned())
            })
            .sortable(true)
            .width(ColumnWidth::Flex(2)),
        Column::new("join_date", "Join Date")
            .header_localized("تاريخ الانضمام")
            .accessor(|member: &Member| member.join_date)
            .sortable(true)
            .align(Alignment::End)
            .width(ColumnWidth::Fixed(12)),
    ]
}

/// Minimal members with just a name and email, in the given order.
pub fn named_members(entries: &[(&str, &str)]) -> Vec<Member> {
    let join_date = calendar_date(REFERENCE_YEAR, 0, 1);
    entries
        .iter()
        .enumerate()
        .map(|(index, (name, email))| Member {
            id: format!("fixture-{}", index + 1),
            name: (*name).to_owned(),
            email: (*email).to_owned(),
            role: Role::User,
            status: Status::Active,
            department: DEPARTMENTS[0].0.to_owned(),
            department_ar: DEPARTMENTS[0].1.to_owned(),
            join_date,
            last_active: join_date,
        })
        .collect()
}

struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Seeded generator for larger or mixed-script member lists.
pub struct DirectoryFaker {
    rng: DeterministicRng,
    seed: u64,
    issued: usize,
}

impl DirectoryFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            seed: normalized,
            issued: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    /// A member whose name is written in Arabic or Latin script at random.
    pub fn member(&mut self) -> Member {
        self.issued += 1;
        let first = self.rng.int_n(FIRST_NAMES.len());
        let last = self.pick(&LAST_NAMES);
        let latin = format!("{} {}", FIRST_NAMES[first], last);
        let name = if self.rng.bool() {
            format!("{} {}", FIRST_NAMES_AR[first], last)
        } else {
            latin.clone()
        };
        let (department, department_ar) = DEPARTMENTS[self.rng.int_n(DEPARTMENTS.len())];

        Member {
            id: format!("member-{}", self.issued),
            name,
            email: email_for(&latin),
            role: Role::ALL[self.rng.int_n(Role::ALL.len())],
            status: Status::ALL[self.rng.int_n(Status::ALL.len())],
            department: department.to_owned(),
            department_ar: department_ar.to_owned(),
            join_date: calendar_date(
                REFERENCE_YEAR,
                self.rng.int_n(12),
                self.rng.int_n(28) + 1,
            ),
            last_active: calendar_date(REFERENCE_YEAR + 1, self.rng.int_n(12), 1),
        }
    }

    pub fn members(&mut self, count: usize) -> Vec<Member> {
        (0..count).map(|_| self.member()).collect()
    }

    /// Fisher-Yates shuffle driven by the faker's seed.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for index in (1..items.len()).rev() {
            let other = self.rng.int_n(index + 1);
            items.swap(index, other);
        }
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }
}

pub fn temp_config_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("config.toml");
    Ok((dir, path))
}

pub fn departments() -> impl Iterator<Item = &'static str> {
    DEPARTMENTS.iter().map(|(en, _)| *en)
}

fn email_for(name: &str) -> String {
    let local = name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(".")
        .replace("al-", "");
    format!("{local}@company.sa")
}

/// `month0` is zero-based, `day` one-based and below 29.
fn calendar_date(year: i32, month0: usize, day: usize) -> Date {
    let month = Month::January.nth_next((month0 % 12) as u8);
    Date::from_calendar_date(year, month, day.clamp(1, 28) as u8).expect("valid calendar date")
}

#[cfg(test)]
mod tests {
    use super::{
        DirectoryFaker, Role, Status, departments, email_for, member_columns, member_directory,
        named_members,
    };
    use jadwal_core::{CellTone, ColumnSet, Locale};
    use std::collections::BTreeSet;
    use time::{Date, Month};

    #[test]
    fn directory_has_fifty_unique_members() {
        let members = member_directory();
        assert_eq!(members.len(), 50);

        let ids: BTreeSet<_> = members.iter().map(|member| member.id.as_str()).collect();
        assert_eq!(ids.len(), 50);
        assert_eq!(members[0].id, "user-1");
        assert_eq!(members[49].id, "user-50");
    }

    #[test]
    fn directory_values_follow_index_rules() {
        let members = member_directory();
        assert!(members[..5].iter().all(|member| member.status == Status::Pending));
        assert_eq!(members[6].status, Status::Active);
        assert_eq!(members[7].status, Status::Inactive);
        assert_eq!(members[1].role, Role::Editor);
        assert_eq!(members[3].department, "HR");
        assert_eq!(members[3].department_ar, "موارد بشرية");
        assert_eq!(
            members[13].join_date,
            Date::from_calendar_date(2024, Month::February, 14).expect("valid date")
        );
        assert_eq!(
            members[8].last_active,
            Date::from_calendar_date(2025, Month::November, 2).expect("valid date")
        );
    }

    #[test]
    fn emails_drop_the_al_prefix() {
        assert_eq!(email_for("Ahmed Al-Mansour"), "ahmed.mansour@company.sa");
        assert_eq!(email_for("Fatima Hassan"), "fatima.hassan@company.sa");
    }

    #[test]
    fn member_columns_validate_and_localize() {
        let members = member_directory();
        let columns =
            ColumnSet::new(member_columns(Locale::Ar)).expect("member columns should be valid");
        assert_eq!(columns.len(), 6);
        assert!(columns.iter().all(|column| column.is_sortable()));

        let role = columns.get("role").expect("role column");
        let rendered = role.render(&members[0]);
        assert_eq!(rendered.text, "مدير");
        assert!(matches!(rendered.tone, CellTone::Badge(_)));

        let department = columns.get("department").expect("department column");
        assert_eq!(department.render(&members[0]).text, "هندسة");
        assert_eq!(department.value(&members[0]).display(), "Engineering");
    }

    #[test]
    fn faker_is_deterministic_per_seed() {
        let mut left = DirectoryFaker::new(7);
        let mut right = DirectoryFaker::new(7);
        assert_eq!(left.members(5), right.members(5));
        assert_eq!(DirectoryFaker::new(0).seed(), 1);
    }

    #[test]
    fn faker_mixes_scripts_across_many_members() {
        let mut faker = DirectoryFaker::new(11);
        let members = faker.members(40);
        let arabic = members
            .iter()
            .filter(|member| member.name.chars().any(|ch| ('\u{0600}'..='\u{06FF}').contains(&ch)))
            .count();
        assert!(arabic > 0);
        assert!(arabic < members.len());
        assert!(members.iter().all(|member| member.email.is_ascii()));
    }

    #[test]
    fn shuffle_keeps_every_item() {
        let mut faker = DirectoryFaker::new(3);
        let mut items: Vec<usize> = (0..20).collect();
        faker.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
        assert_eq!(faker.int_n(1), 0);
    }

    #[test]
    fn named_members_keep_order() {
        let members = named_members(&[("B", "b@x"), ("A", "a@x")]);
        assert_eq!(members[0].name, "B");
        assert_eq!(members[1].email, "a@x");
        assert_eq!(departments().count(), 10);
    }
}
