//! Menu text and selection parsing.

pub const MAIN_MENU: &str = "\
Student Management System Menu:
1. Add Student
2. Update Student
3. Delete Student
4. Search Student
5. Export Student Data to CSV
6. Exit";

pub const SEARCH_MENU: &str = "\
Search Student Menu:
1. Search by Roll No.
2. Search by Email";

/// A main menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Update,
    Delete,
    Search,
    Export,
    Exit,
}

impl MenuChoice {
    /// Parse a line of input; anything but `1`..`6` is `None`.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::Update),
            "3" => Some(MenuChoice::Delete),
            "4" => Some(MenuChoice::Search),
            "5" => Some(MenuChoice::Export),
            "6" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// A search sub-menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchChoice {
    ByRollNo,
    ByEmail,
}

impl SearchChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(SearchChoice::ByRollNo),
            "2" => Some(SearchChoice::ByEmail),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Add));
        assert_eq!(MenuChoice::parse(" 6\n"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("7"), None);
        assert_eq!(MenuChoice::parse("exit"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn test_search_choice_parse() {
        assert_eq!(SearchChoice::parse("2"), Some(SearchChoice::ByEmail));
        assert_eq!(SearchChoice::parse("3"), None);
    }

    #[test]
    fn test_main_menu_lists_six_options() {
        assert_eq!(MAIN_MENU.lines().filter(|l| l.contains(". ")).count(), 6);
    }
}
