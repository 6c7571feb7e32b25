//! Interactive collection of the selection record.

use dialoguer::{Confirm, Input, Select};
use serde_json::{Map, Value};

use crate::constants::DEFAULT_VERSION;
use crate::error::{Error, Result};
use crate::feature::{Bundler, Language, PackageManager, Selection};
use crate::validation::is_valid_id;

/// Source of answers for the questions asked by [`collect_selection`].
pub trait Prompter {
    /// Free-form text. `validate` returns an error message for rejected input.
    fn input(
        &self,
        prompt: &str,
        default: Option<&str>,
        validate: &dyn Fn(&str) -> Option<String>,
    ) -> Result<String>;

    /// Index of the chosen item.
    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Result<usize>;

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}

/// Terminal prompts backed by dialoguer.
#[derive(Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn input(
        &self,
        prompt: &str,
        default: Option<&str>,
        validate: &dyn Fn(&str) -> Option<String>,
    ) -> Result<String> {
        let mut input = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .validate_with(|value: &String| -> std::result::Result<(), String> {
                match validate(value) {
                    Some(message) => Err(message),
                    None => Ok(()),
                }
            });
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        input.interact_text().map_err(|e| Error::Prompt(e.to_string()))
    }

    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Result<usize> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()
            .map_err(|e| Error::Prompt(e.to_string()))
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(|e| Error::Prompt(e.to_string()))
    }
}

fn accept_any(_: &str) -> Option<String> {
    None
}

fn check_id(value: &str) -> Option<String> {
    if is_valid_id(value) {
        None
    } else {
        Some("Invalid ID.".to_string())
    }
}

fn check_required(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some("This field is required.".to_string())
    } else {
        None
    }
}

/// Asks a choice question unless only one option exists.
fn choose(
    prompter: &dyn Prompter,
    prompt: &str,
    labels: &[&str],
    names: &[&str],
) -> Result<Value> {
    let index = if labels.len() > 1 {
        prompter.select(prompt, labels, 0)?
    } else {
        0
    };
    let name = names
        .get(index)
        .ok_or_else(|| Error::Prompt(format!("selection {index} is out of range")))?;
    Ok(Value::String(name.to_string()))
}

/// Text fields arrive as numbers or booleans from YAML (`version: 1.0`);
/// keep their textual form.
fn stringify_text_answers(answers: &mut Map<String, Value>) {
    for key in ["id", "name", "author", "version", "description"] {
        if let Some(value) = answers.get_mut(key) {
            if matches!(value, Value::Number(_) | Value::Bool(_)) {
                *value = Value::String(value.to_string());
            }
        }
    }
}

/// Builds a [`Selection`], asking only for fields missing from `preloaded`.
///
/// # Errors
/// * `Error::Prompt` if interaction fails
/// * `Error::Json` if the preloaded answers have the wrong shape
pub fn collect_selection(prompter: &dyn Prompter, preloaded: &Value) -> Result<Selection> {
    let mut answers: Map<String, Value> = match preloaded {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };
    stringify_text_answers(&mut answers);

    let text_questions: [(&str, &str, Option<&str>, fn(&str) -> Option<String>); 5] = [
        ("id", "Extension ID:", None, check_id),
        ("name", "Name:", None, check_required),
        ("description", "Description:", Some(""), accept_any),
        ("version", "Version:", Some(DEFAULT_VERSION), accept_any),
        ("author", "Author:", Some(""), accept_any),
    ];
    for (key, prompt, default, validate) in text_questions {
        if !answers.contains_key(key) {
            let value = prompter.input(prompt, default, &validate)?;
            answers.insert(key.to_string(), Value::String(value));
        }
    }

    if !answers.contains_key("language") {
        let labels: Vec<&str> = Language::ALL.iter().map(|l| l.label()).collect();
        let names: Vec<&str> = Language::ALL.iter().map(|l| l.name()).collect();
        let value = choose(
            prompter,
            "Choose your development language:",
            &labels,
            &names,
        )?;
        answers.insert("language".to_string(), value);
    }
    if !answers.contains_key("package_manager") {
        let names: Vec<&str> = PackageManager::ALL.iter().map(|p| p.name()).collect();
        let value = choose(prompter, "Choose your package manager:", &names, &names)?;
        answers.insert("package_manager".to_string(), value);
    }
    if !answers.contains_key("bundler") {
        let names: Vec<&str> = Bundler::ALL.iter().map(|b| b.name()).collect();
        let value = choose(prompter, "Choose your bundler:", &names, &names)?;
        answers.insert("bundler".to_string(), value);
    }
    if !answers.contains_key("use_git") {
        let value = prompter.confirm("Use git?", true)?;
        answers.insert("use_git".to_string(), Value::Bool(value));
    }

    // Empty optional answers mean "not given".
    for key in ["description", "version"] {
        if answers.get(key).and_then(Value::as_str) == Some("") {
            answers.remove(key);
        }
    }

    Ok(serde_json::from_value(Value::Object(answers))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Answers questions from a script and records what was asked.
    #[derive(Default)]
    struct ScriptedPrompter {
        answers: RefCell<VecDeque<Value>>,
        asked: RefCell<Vec<String>>,
    }

    impl ScriptedPrompter {
        fn new(answers: Vec<Value>) -> Self {
            Self {
                answers: RefCell::new(answers.into()),
                asked: RefCell::default(),
            }
        }

        fn next(&self, prompt: &str) -> Value {
            self.asked.borrow_mut().push(prompt.to_string());
            self.answers
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| panic!("no scripted answer for '{prompt}'"))
        }
    }

    impl Prompter for ScriptedPrompter {
        fn input(
            &self,
            prompt: &str,
            _default: Option<&str>,
            validate: &dyn Fn(&str) -> Option<String>,
        ) -> Result<String> {
            let value = self.next(prompt).as_str().unwrap().to_string();
            match validate(&value) {
                Some(message) => Err(Error::Prompt(message)),
                None => Ok(value),
            }
        }

        fn select(&self, prompt: &str, _items: &[&str], _default: usize) -> Result<usize> {
            Ok(self.next(prompt).as_u64().unwrap() as usize)
        }

        fn confirm(&self, prompt: &str, _default: bool) -> Result<bool> {
            Ok(self.next(prompt).as_bool().unwrap())
        }
    }

    #[test]
    fn test_collects_every_answer() {
        let prompter = ScriptedPrompter::new(vec![
            json!("foo.bar"),
            json!("Foo"),
            json!(""),
            json!("1.0.0"),
            json!("Alice, Bob"),
            json!(1),
            json!(3),
            json!(false),
        ]);
        let selection = collect_selection(&prompter, &Value::Null).unwrap();

        assert_eq!(selection.metadata.id, "foo.bar");
        assert_eq!(selection.metadata.description, None);
        assert_eq!(selection.metadata.version.as_deref(), Some("1.0.0"));
        assert_eq!(selection.language, Language::TypeScript);
        assert_eq!(selection.package_manager, PackageManager::Pnpm);
        assert_eq!(selection.bundler, Bundler::Webpack);
        assert!(!selection.use_git);
        // Single-choice bundler question is not asked.
        assert!(!prompter
            .asked
            .borrow()
            .iter()
            .any(|q| q.contains("bundler")));
    }

    #[test]
    fn test_preloaded_answers_are_not_asked() {
        let prompter = ScriptedPrompter::new(vec![json!("Alice")]);
        let preloaded = json!({
            "id": "foo",
            "name": "Foo",
            "description": "d",
            "version": "0.1.0",
            "language": "javascript",
            "package_manager": "yarn",
            "use_git": true
        });
        let selection = collect_selection(&prompter, &preloaded).unwrap();

        assert_eq!(*prompter.asked.borrow(), ["Author:"]);
        assert_eq!(selection.metadata.author, "Alice");
        assert_eq!(selection.package_manager, PackageManager::Yarn);
        assert!(selection.use_git);
    }

    #[test]
    fn test_invalid_id_is_rejected() {
        let prompter = ScriptedPrompter::new(vec![json!("Not Valid")]);
        assert!(matches!(
            collect_selection(&prompter, &Value::Null),
            Err(Error::Prompt(_))
        ));
    }

    #[test]
    fn test_numeric_text_answers_become_strings() {
        let prompter = ScriptedPrompter::default();
        let preloaded = crate::parser::parse_answers(
            "id: foo\nname: 42\nauthor: Alice\nversion: 1.0\ndescription: true\n\
             language: javascript\npackage_manager: npm\nbundler: webpack\nuse_git: false\n",
        )
        .unwrap();
        let selection = collect_selection(&prompter, &preloaded).unwrap();

        assert_eq!(selection.metadata.name, "42");
        assert_eq!(selection.metadata.version.as_deref(), Some("1.0"));
        assert_eq!(selection.metadata.description.as_deref(), Some("true"));
        assert!(prompter.asked.borrow().is_empty());
    }

    #[test]
    fn test_bad_preloaded_choice() {
        let prompter = ScriptedPrompter::default();
        let preloaded = json!({
            "id": "foo", "name": "Foo", "description": "", "version": "", "author": "A",
            "language": "cobol", "package_manager": "npm", "bundler": "webpack", "use_git": false
        });
        assert!(matches!(
            collect_selection(&prompter, &preloaded),
            Err(Error::Json(_))
        ));
    }
}
