/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Swappable message catalogs for reports and prompts.
//!
//! Every user-visible sentence goes through [`Messages`], so adding a language
//! means adding one `impl` and one [`Locale`] variant; the solver and the
//! renderers never change.

use std::fmt;
use std::str::FromStr;

use crate::frame::TaskCheck;

/// User-visible text, one method per sentence.
pub trait Messages: Send + Sync {
    // ── solve report ──────────────────────────────────────────────────────────
    fn title(&self) -> String;
    fn search_header(&self) -> String;
    fn hyperperiod(&self, h: u64) -> String;
    fn min_frame_size(&self, e_max: f64) -> String;
    fn candidates(&self, candidates: &[u64]) -> String;
    fn checking(&self, frame_size: u64) -> String;
    fn feasible(&self, frame_size: u64) -> String;
    fn infeasible(&self) -> String;

    /// One deadline-check line, e.g. `T2: 2 * 4 - gcd(5,4) = 7 > D2(5) ✗`.
    ///
    /// The formula is the same in every language.
    fn task_check(&self, c: &TaskCheck) -> String {
        let (rel, mark) = if c.passed { ("≤", "✓") } else { (">", "✗") };
        format!(
            "{name}: 2 * {f} - gcd({p},{f}) = {lhs} {rel} D{i}({d}) {mark}",
            name = c.task,
            f = c.frame_size,
            p = c.period,
            lhs = c.lhs,
            i = c.task_index,
            d = c.deadline,
        )
    }

    // ── interactive prompt ────────────────────────────────────────────────────
    fn task_count_prompt(&self) -> String;
    fn period_prompt(&self, task: usize) -> String;
    fn execution_time_prompt(&self, task: usize) -> String;
    fn deadline_prompt(&self, task: usize) -> String;
    fn task_count_error(&self) -> String;
    fn period_error(&self) -> String;
    fn execution_time_error(&self) -> String;
    fn deadline_error(&self) -> String;

    // ── arithmetic helpers ────────────────────────────────────────────────────
    fn lcm_result(&self, numbers: &[u64], lcm: u64) -> String;
    fn gcd_result(&self, a: u64, b: u64, gcd: u64) -> String;
    fn divisors_result(&self, divisors: &[u64]) -> String;
}

// ── English ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl Messages for English {
    fn title(&self) -> String {
        "=== Find the Largest Frame Size for a Cyclic Scheduler ===".into()
    }
    fn search_header(&self) -> String {
        "=== Finding the Largest Frame Size ===".into()
    }
    fn hyperperiod(&self, h: u64) -> String {
        format!("Hyperperiod H = {h}")
    }
    fn min_frame_size(&self, e_max: f64) -> String {
        format!("Minimum feasible frame size f ≥ max(e_i) = {e_max}")
    }
    fn candidates(&self, candidates: &[u64]) -> String {
        format!(
            "Divisors of hyperperiod satisfying f ≥ max(e_i), in descending order: {candidates:?}"
        )
    }
    fn checking(&self, frame_size: u64) -> String {
        format!("### Checking f = {frame_size} ###")
    }
    fn feasible(&self, frame_size: u64) -> String {
        format!("✓ Largest feasible frame size guaranteeing timely completion is f = {frame_size}")
    }
    fn infeasible(&self) -> String {
        "✗ No largest feasible frame size guaranteeing timely completion exists".into()
    }

    fn task_count_prompt(&self) -> String {
        "Enter the number of tasks in the set: ".into()
    }
    fn period_prompt(&self, task: usize) -> String {
        format!("For task T{task}, enter period P{task}: ")
    }
    fn execution_time_prompt(&self, task: usize) -> String {
        format!("For task T{task}, enter execution time e{task}: ")
    }
    fn deadline_prompt(&self, task: usize) -> String {
        format!("For task T{task}, enter deadline D{task} or press Enter if D{task} = P{task}: ")
    }
    fn task_count_error(&self) -> String {
        "Error: please enter a positive integer.".into()
    }
    fn period_error(&self) -> String {
        "Error: period must be a positive integer.".into()
    }
    fn execution_time_error(&self) -> String {
        "Error: execution time must be a positive number.".into()
    }
    fn deadline_error(&self) -> String {
        "Error: deadline must be a positive number.".into()
    }

    fn lcm_result(&self, numbers: &[u64], lcm: u64) -> String {
        format!("LCM of {numbers:?} = {lcm}")
    }
    fn gcd_result(&self, a: u64, b: u64, gcd: u64) -> String {
        format!("GCD({a},{b}) = {gcd}")
    }
    fn divisors_result(&self, divisors: &[u64]) -> String {
        format!("Divisors: {divisors:?}")
    }
}

// ── Russian ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct Russian;

impl Messages for Russian {
    fn title(&self) -> String {
        "=== Найти наибольший размер кадра для циклического планировщика ===".into()
    }
    fn search_header(&self) -> String {
        "=== Поиск наибольшего размера кадра ===".into()
    }
    fn hyperperiod(&self, h: u64) -> String {
        format!("Гиперпериод H = {h}")
    }
    fn min_frame_size(&self, e_max: f64) -> String {
        format!("Минимально допустимый размер кадра f ≥ max(e_i) = {e_max}")
    }
    fn candidates(&self, candidates: &[u64]) -> String {
        format!(
            "Кандидаты (делители гиперпериода) после f ≥ max(e_i) в порядке убывания: {candidates:?}"
        )
    }
    fn checking(&self, frame_size: u64) -> String {
        format!("### Проверка f = {frame_size} ###")
    }
    fn feasible(&self, frame_size: u64) -> String {
        format!(
            "✓ Наибольший размер кадра, гарантирующий своевременное выполнение, f = {frame_size}"
        )
    }
    fn infeasible(&self) -> String {
        "✗ Не существует наибольшего размера кадра, гарантирующего своевременное выполнение".into()
    }

    fn task_count_prompt(&self) -> String {
        "Введите число задач в наборе: ".into()
    }
    fn period_prompt(&self, task: usize) -> String {
        format!("Для задачи T{task} введите период P{task}: ")
    }
    fn execution_time_prompt(&self, task: usize) -> String {
        format!("Для задачи T{task} введите время выполнения e{task}: ")
    }
    fn deadline_prompt(&self, task: usize) -> String {
        format!("Для задачи T{task} введите дедлайн D{task} или нажмите Enter, если D{task} = P{task}: ")
    }
    fn task_count_error(&self) -> String {
        "Ошибка: введите целое положительное число.".into()
    }
    fn period_error(&self) -> String {
        "Ошибка: период должен быть целым положительным числом.".into()
    }
    fn execution_time_error(&self) -> String {
        "Ошибка: время выполнения должно быть положительным числом.".into()
    }
    fn deadline_error(&self) -> String {
        "Ошибка: дедлайн должен быть положительным числом.".into()
    }

    fn lcm_result(&self, numbers: &[u64], lcm: u64) -> String {
        format!("НОК чисел {numbers:?} = {lcm}")
    }
    fn gcd_result(&self, a: u64, b: u64, gcd: u64) -> String {
        format!("НОД({a},{b}) = {gcd}")
    }
    fn divisors_result(&self, divisors: &[u64]) -> String {
        format!("Делители: {divisors:?}")
    }
}

// ── Locale ────────────────────────────────────────────────────────────────────

/// Available message catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Ru,
}

static ENGLISH: English = English;
static RUSSIAN: Russian = Russian;

impl Locale {
    /// The catalog for this locale.
    pub fn messages(self) -> &'static dyn Messages {
        match self {
            Locale::En => &ENGLISH,
            Locale::Ru => &RUSSIAN,
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "ru" | "russian" => Ok(Locale::Ru),
            other => Err(format!("unsupported language '{other}' (expected: en, ru)")),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => f.write_str("en"),
            Locale::Ru => f.write_str("ru"),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn check(passed: bool, lhs: u64) -> TaskCheck {
        TaskCheck {
            task_index: 2,
            task: "T2".into(),
            period: 5,
            frame_size: 4,
            gcd: 1,
            lhs,
            deadline: 5.0,
            passed,
        }
    }

    #[test]
    fn task_check_line_for_failure() {
        assert_eq!(
            English.task_check(&check(false, 7)),
            "T2: 2 * 4 - gcd(5,4) = 7 > D2(5) ✗"
        );
    }

    #[test]
    fn task_check_line_is_shared_between_locales() {
        let c = check(true, 3);
        assert_eq!(English.task_check(&c), Russian.task_check(&c));
        assert!(English.task_check(&c).ends_with("≤ D2(5) ✓"));
    }

    #[test]
    fn candidates_list_uses_brackets() {
        assert!(English.candidates(&[20, 10, 5]).ends_with("[20, 10, 5]"));
    }

    #[test]
    fn locales_produce_different_text() {
        assert_ne!(Locale::En.messages().title(), Locale::Ru.messages().title());
        assert_eq!(Locale::Ru.messages().gcd_result(12, 8, 4), "НОД(12,8) = 4");
    }

    #[test]
    fn locale_parses_codes_and_names() {
        assert_eq!("RU".parse::<Locale>().unwrap(), Locale::Ru);
        assert_eq!("english".parse::<Locale>().unwrap(), Locale::En);
        assert!("de".parse::<Locale>().is_err());
        assert_eq!(Locale::Ru.to_string(), "ru");
    }
}
