//! Interactive cook shell
//!
//! Line-oriented front-end over the session: browse and filter the analysis
//! results, cook through a recipe step by step, and manage the shopping
//! list. All state lives in the session; the shell only parses intents and
//! renders the read surface after each one.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::core::{CookPosition, DietaryFilter, Session, View};

/// A parsed shell intent
#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    List,
    Filter(DietaryFilter),
    Cook(usize),
    Next,
    Back,
    Done,
    Add(String),
    Drop(String),
    Cart,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

fn parse_command(line: &str) -> ShellCommand {
    let line = line.trim();
    if line.is_empty() {
        return ShellCommand::Empty;
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((v, r)) => (v, r.trim()),
        None => (line, ""),
    };

    match verb.to_lowercase().as_str() {
        "list" | "ls" => ShellCommand::List,
        "filter" | "f" => match rest.parse::<DietaryFilter>() {
            Ok(filter) => ShellCommand::Filter(filter),
            Err(_) => ShellCommand::Unknown(line.to_string()),
        },
        "cook" | "c" => match rest.parse::<usize>() {
            Ok(n) if n >= 1 => ShellCommand::Cook(n),
            _ => ShellCommand::Unknown(line.to_string()),
        },
        "next" | "n" => ShellCommand::Next,
        "back" | "b" => ShellCommand::Back,
        "done" | "d" => ShellCommand::Done,
        "add" | "a" if !rest.is_empty() => ShellCommand::Add(rest.to_string()),
        "drop" | "rm" if !rest.is_empty() => ShellCommand::Drop(rest.to_string()),
        "cart" | "shopping" => ShellCommand::Cart,
        "help" | "?" => ShellCommand::Help,
        "quit" | "q" | "exit" => ShellCommand::Quit,
        _ => ShellCommand::Unknown(line.to_string()),
    }
}

/// Run the interactive loop until `quit` or end of input
pub fn run(session: &mut Session) -> Result<()> {
    println!();
    render(session);
    print_hint();

    let stdin = io::stdin();
    let mut handle = stdin.lock();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if handle.read_line(&mut line)? == 0 {
            break; // end of input
        }

        match parse_command(&line) {
            ShellCommand::Quit => break,
            ShellCommand::Empty => {}
            ShellCommand::Help => print_help(),
            ShellCommand::List => render(session),
            ShellCommand::Filter(filter) => {
                session.set_dietary_filter(filter);
                render(session);
            }
            ShellCommand::Cook(n) => {
                let id = session.filtered_recipes().get(n - 1).map(|r| r.id);
                match id {
                    Some(id) => {
                        // Id comes straight from the list; failure here is a bug
                        session.select_recipe(id)?;
                        render(session);
                    }
                    None => println!("No recipe #{} in the current list. Try `list`.", n),
                }
            }
            ShellCommand::Next => match session.advance_step() {
                Ok(()) => render(session),
                Err(e) => println!("{} - pick a recipe first with `cook <n>`.", e),
            },
            ShellCommand::Back => match session.retreat_step() {
                Ok(()) => render(session),
                Err(e) => println!("{} - pick a recipe first with `cook <n>`.", e),
            },
            ShellCommand::Done => {
                if matches!(session.view(), View::Cooking { .. }) {
                    session.close_cooking();
                    render(session);
                } else {
                    println!("Nothing to close. `quit` leaves the shell.");
                }
            }
            ShellCommand::Add(item) => {
                session.add_to_shopping_list(&item);
                print_cart(session);
            }
            ShellCommand::Drop(item) => {
                session.remove_from_shopping_list(&item);
                print_cart(session);
            }
            ShellCommand::Cart => print_cart(session),
            ShellCommand::Unknown(text) => {
                println!("Unknown command: {}. Type `help` for available commands.", text);
            }
        }
    }

    session.close_cooking();
    Ok(())
}

fn print_hint() {
    println!("Type `cook <n>` to start cooking, `help` for all commands.");
}

fn print_help() {
    println!("Commands:");
    println!("  list                show recipes for the current filter");
    println!("  filter <name>       all | vegetarian | vegan | keto | gluten-free");
    println!("  cook <n>            start cooking recipe n from the list");
    println!("  next / back         move through the cooking steps");
    println!("  done                leave the cooking view");
    println!("  add <item>          add an ingredient to the shopping list");
    println!("  drop <item>         remove an ingredient from the shopping list");
    println!("  cart                show the shopping list");
    println!("  quit                exit");
}

fn render(session: &Session) {
    match session.view() {
        View::Upload => println!("No analysis yet. Run `fridgechef analyze <image>` first."),
        View::Results => render_results(session),
        View::Cooking { .. } => render_cooking(session),
    }
}

fn render_results(session: &Session) {
    if !session.detected_ingredients().is_empty() {
        println!("Detected: {}", session.detected_ingredients().join(", "));
    }
    println!("Filter: {}", session.dietary_filter());

    let recipes = session.filtered_recipes();
    if recipes.is_empty() {
        println!("No recipes found for this filter. Try `filter all`.");
        return;
    }

    println!("Suggested recipes:");
    for (i, recipe) in recipes.iter().enumerate() {
        let tags = if recipe.tags.is_empty() {
            String::new()
        } else {
            format!("  [{}]", recipe.tags.join(", "))
        };
        println!(
            "  {}. {} - {} | {} | {} kcal{}",
            i + 1,
            recipe.name,
            recipe.difficulty,
            recipe.prep_time,
            recipe.calories,
            tags
        );
        println!("     {}", recipe.description);
    }
}

fn render_cooking(session: &Session) {
    let (recipe, position) = match (session.selected_recipe(), session.cook_position()) {
        (Some(r), Some(p)) => (r, p),
        _ => return,
    };

    println!("=== Cooking: {} ===", recipe.name);

    match position {
        CookPosition::Ingredients => {
            println!("Gather ingredients:");
            for ing in &recipe.ingredients {
                let marker = if ing.is_missing { "missing" } else { "have" };
                println!("  [{}] {} ({})", marker, ing.name, ing.quantity);
            }
            if recipe.ingredients.iter().any(|i| i.is_missing) {
                println!("Add missing items with `add <name>`. `next` starts cooking.");
            } else {
                println!("All set. `next` starts cooking.");
            }
        }
        CookPosition::Step(i) => {
            println!("{}", progress_dots(position, recipe.steps.len()));
            println!("Step {} of {}: {}", i + 1, recipe.steps.len(), recipe.steps[i]);
        }
        CookPosition::Finished => {
            println!("Bon Appetit! You've completed this recipe.");
            println!("`done` returns to the recipe list.");
        }
    }
}

/// One dot per position: the ingredients overview plus each step
fn progress_dots(position: CookPosition, step_count: usize) -> String {
    let current = position.index(step_count);
    let mut dots = String::new();
    for i in -1..=(step_count as i64 - 1) {
        dots.push_str(if i == current { "[*]" } else { "[ ]" });
    }
    dots
}

fn print_cart(session: &Session) {
    let list = session.shopping_list();
    if list.is_empty() {
        println!("Shopping list is empty. Add missing ingredients from recipes.");
    } else {
        println!("Shopping list:");
        for item in list {
            println!("  - {}", item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_commands() {
        assert_eq!(parse_command("list"), ShellCommand::List);
        assert_eq!(parse_command("  next  "), ShellCommand::Next);
        assert_eq!(parse_command("b"), ShellCommand::Back);
        assert_eq!(parse_command("quit"), ShellCommand::Quit);
        assert_eq!(parse_command(""), ShellCommand::Empty);
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            parse_command("filter keto"),
            ShellCommand::Filter(DietaryFilter::Keto)
        );
        assert_eq!(
            parse_command("f gluten-free"),
            ShellCommand::Filter(DietaryFilter::GlutenFree)
        );
        assert!(matches!(
            parse_command("filter paleo"),
            ShellCommand::Unknown(_)
        ));
    }

    #[test]
    fn test_parse_cook_requires_number() {
        assert_eq!(parse_command("cook 2"), ShellCommand::Cook(2));
        assert!(matches!(parse_command("cook"), ShellCommand::Unknown(_)));
        assert!(matches!(parse_command("cook 0"), ShellCommand::Unknown(_)));
        assert!(matches!(
            parse_command("cook omelette"),
            ShellCommand::Unknown(_)
        ));
    }

    #[test]
    fn test_parse_shopping_commands() {
        assert_eq!(
            parse_command("add soy sauce"),
            ShellCommand::Add("soy sauce".to_string())
        );
        assert_eq!(
            parse_command("drop salt"),
            ShellCommand::Drop("salt".to_string())
        );
        assert!(matches!(parse_command("add"), ShellCommand::Unknown(_)));
        assert_eq!(parse_command("cart"), ShellCommand::Cart);
    }

    #[test]
    fn test_progress_dots_marks_current() {
        assert_eq!(progress_dots(CookPosition::Ingredients, 2), "[*][ ][ ]");
        assert_eq!(progress_dots(CookPosition::Step(0), 2), "[ ][*][ ]");
        assert_eq!(progress_dots(CookPosition::Step(1), 2), "[ ][ ][*]");
        // Finished has no dot of its own
        assert_eq!(progress_dots(CookPosition::Finished, 2), "[ ][ ][ ]");
    }
}
