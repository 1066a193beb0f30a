//! Interactive menu loop for the contact client.
//!
//! One numbered action per iteration; every action issues at most one HTTP
//! call. Transport and service errors are printed and the loop continues.

use std::fs;
use std::io::{self, BufRead, Write};

use crate::client::{ApiClient, ClientError};
use crate::contact::{Contact, ContactPatch, NewContact};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    List,
    Add,
    View,
    Update,
    Delete,
    Filter,
    Export,
    Exit,
}

pub fn parse_choice(input: &str) -> Option<MenuChoice> {
    match input.trim() {
        "1" => Some(MenuChoice::List),
        "2" => Some(MenuChoice::Add),
        "3" => Some(MenuChoice::View),
        "4" => Some(MenuChoice::Update),
        "5" => Some(MenuChoice::Delete),
        "6" => Some(MenuChoice::Filter),
        "7" => Some(MenuChoice::Export),
        "8" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// Only an explicit yes proceeds; anything else cancels.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Phone entries must be numeric.
pub fn valid_phone(phone: &str) -> bool {
    phone.parse::<i64>().is_ok()
}

pub fn render_table(contacts: &[Contact]) -> String {
    let mut out = format!(
        "{:<5} {:<20} {:<25} {:<15} {:<12}\n",
        "ID", "NAME", "EMAIL", "PHONE", "RELATION"
    );
    out.push_str(&"-".repeat(80));
    out.push('\n');
    for contact in contacts {
        out.push_str(&format!(
            "{:<5} {:<20} {:<25} {:<15} {:<12}\n",
            contact.id,
            contact.name,
            contact.email,
            contact.phone.as_deref().unwrap_or("-"),
            contact.relation.as_deref().unwrap_or("-"),
        ));
    }
    out
}

pub fn render_contact(contact: &Contact) -> String {
    let field = |value: &Option<String>| value.as_deref().unwrap_or("-").to_string();
    format!(
        "Id:       {}\n\
         Name:     {}\n\
         Email:    {}\n\
         Phone:    {}\n\
         Relation: {}\n\
         Notes:    {}\n\
         Address:  {}\n",
        contact.id,
        contact.name,
        contact.email,
        field(&contact.phone),
        field(&contact.relation),
        field(&contact.notes),
        field(&contact.address),
    )
}

/// Runs the menu until the user picks exit.
pub fn run(client: &ApiClient) -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        print_menu();
        let line = read_line(&mut input, "Choose an option: ")?;
        let Some(choice) = parse_choice(&line) else {
            println!("Invalid option: {line}");
            continue;
        };
        if choice == MenuChoice::Exit {
            println!("Bye.");
            return Ok(());
        }
        match choice {
            MenuChoice::List => list_action(client),
            MenuChoice::Add => add_action(client, &mut input)?,
            MenuChoice::View => view_action(client, &mut input)?,
            MenuChoice::Update => update_action(client, &mut input)?,
            MenuChoice::Delete => delete_action(client, &mut input)?,
            MenuChoice::Filter => filter_action(client, &mut input)?,
            MenuChoice::Export => export_action(client, &mut input)?,
            MenuChoice::Exit => unreachable!(),
        }
        read_line(&mut input, "Press Enter to continue...")?;
    }
}

fn print_menu() {
    println!();
    println!("Contact Manager");
    println!("1. List all contacts");
    println!("2. Add a contact");
    println!("3. View a contact");
    println!("4. Update a contact");
    println!("5. Delete a contact");
    println!("6. Filter by relation");
    println!("7. Export contacts");
    println!("8. Exit");
}

fn read_line(input: &mut impl BufRead, prompt: &str) -> io::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Re-prompts until the user enters something.
fn prompt_required(input: &mut impl BufRead, prompt: &str) -> io::Result<String> {
    loop {
        let line = read_line(input, prompt)?;
        if !line.is_empty() {
            return Ok(line);
        }
        println!("This field is required.");
    }
}

/// Blank means skipped.
fn prompt_optional(input: &mut impl BufRead, prompt: &str) -> io::Result<Option<String>> {
    let line = read_line(input, prompt)?;
    Ok(if line.is_empty() { None } else { Some(line) })
}

fn print_error(err: ClientError) {
    match err {
        ClientError::Api { body, .. } => println!("{body}"),
        ClientError::Transport(err) => println!("Request failed: {err}"),
    }
}

fn list_action(client: &ApiClient) {
    match client.list() {
        Ok(contacts) if contacts.is_empty() => println!("No contacts stored."),
        Ok(contacts) => print!("{}", render_table(&contacts)),
        Err(err) => print_error(err),
    }
}

fn add_action(client: &ApiClient, input: &mut impl BufRead) -> io::Result<()> {
    let name = prompt_required(input, "Name: ")?;
    let email = prompt_required(input, "Email: ")?;
    let phone = prompt_optional(input, "Phone (blank to skip): ")?;
    if let Some(phone) = &phone {
        if !valid_phone(phone) {
            println!("Phone must be a number; contact not created.");
            return Ok(());
        }
    }
    let relation = prompt_optional(input, "Relation (blank to skip): ")?;
    let notes = prompt_optional(input, "Notes (blank to skip): ")?;
    let address = prompt_optional(input, "Address (blank to skip): ")?;

    let payload = NewContact {
        name: Some(name),
        email: Some(email),
        phone,
        relation,
        notes,
        address,
    };
    match client.create(&payload) {
        Ok(contact) => {
            println!("Created contact {}.", contact.id);
            print!("{}", render_contact(&contact));
        }
        Err(err) => print_error(err),
    }
    Ok(())
}

fn view_action(client: &ApiClient, input: &mut impl BufRead) -> io::Result<()> {
    let Some(id) = prompt_id(input)? else {
        return Ok(());
    };
    match client.get(id) {
        Ok(contact) => print!("{}", render_contact(&contact)),
        Err(err) => print_error(err),
    }
    Ok(())
}

fn update_action(client: &ApiClient, input: &mut impl BufRead) -> io::Result<()> {
    let Some(id) = prompt_id(input)? else {
        return Ok(());
    };
    println!("Leave a field blank to keep its current value.");
    let mut patch = ContactPatch::default();
    if let Some(name) = prompt_optional(input, "New name: ")? {
        patch.name = Some(Some(name));
    }
    if let Some(email) = prompt_optional(input, "New email: ")? {
        patch.email = Some(Some(email));
    }
    if let Some(phone) = prompt_optional(input, "New phone: ")? {
        if !valid_phone(&phone) {
            println!("Phone must be a number; contact not updated.");
            return Ok(());
        }
        patch.phone = Some(Some(phone));
    }
    if let Some(relation) = prompt_optional(input, "New relation: ")? {
        patch.relation = Some(Some(relation));
    }
    if let Some(notes) = prompt_optional(input, "New notes: ")? {
        patch.notes = Some(Some(notes));
    }
    if let Some(address) = prompt_optional(input, "New address: ")? {
        patch.address = Some(Some(address));
    }

    match client.update(id, &patch) {
        Ok(message) => println!("{}", message.message),
        Err(err) => print_error(err),
    }
    Ok(())
}

fn delete_action(client: &ApiClient, input: &mut impl BufRead) -> io::Result<()> {
    let Some(id) = prompt_id(input)? else {
        return Ok(());
    };
    let answer = read_line(input, &format!("Really delete contact {id}? [y/N]: "))?;
    if !is_affirmative(&answer) {
        println!("Delete cancelled.");
        return Ok(());
    }
    match client.delete(id) {
        Ok(message) => println!("{}", message.message),
        Err(err) => print_error(err),
    }
    Ok(())
}

fn filter_action(client: &ApiClient, input: &mut impl BufRead) -> io::Result<()> {
    let relation = prompt_required(input, "Relation contains: ")?;
    match client.filter_by_relation(&relation) {
        Ok(contacts) => print!("{}", render_table(&contacts)),
        Err(err) => print_error(err),
    }
    Ok(())
}

fn export_action(client: &ApiClient, input: &mut impl BufRead) -> io::Result<()> {
    let filename = prompt_required(input, "Save as: ")?;
    match client.export() {
        Ok(bytes) => match fs::write(&filename, &bytes) {
            Ok(()) => println!("Wrote {} bytes to {filename}.", bytes.len()),
            Err(err) => println!("Could not write {filename}: {err}"),
        },
        Err(err) => print_error(err),
    }
    Ok(())
}

/// Reads a contact id; a non-numeric entry aborts the action.
fn prompt_id(input: &mut impl BufRead) -> io::Result<Option<i32>> {
    let line = read_line(input, "Contact id: ")?;
    match line.parse::<i32>() {
        Ok(id) => Ok(Some(id)),
        Err(_) => {
            println!("Id must be a number.");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(id: i32) -> Contact {
        Contact {
            id,
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            phone: Some("5551234".to_string()),
            relation: None,
            notes: None,
            address: None,
        }
    }

    #[test]
    fn choices_map_to_menu_numbers() {
        assert_eq!(parse_choice("1"), Some(MenuChoice::List));
        assert_eq!(parse_choice(" 8 "), Some(MenuChoice::Exit));
        assert_eq!(parse_choice("9"), None);
        assert_eq!(parse_choice("list"), None);
    }

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("YES"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("sure"));
    }

    #[test]
    fn phone_entries_must_be_numeric() {
        assert!(valid_phone("5551234"));
        assert!(valid_phone("+495551234"));
        assert!(!valid_phone("555-1234"));
        assert!(!valid_phone("call me"));
    }

    #[test]
    fn table_rows_are_fixed_width() {
        let out = render_table(&[contact(1)]);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("ID    NAME"));
        assert!(lines[2].starts_with("1     Ann"));
        // missing optional fields render as a dash
        assert!(lines[2].contains(" - "));
    }

    #[test]
    fn single_record_view_labels_every_field() {
        let out = render_contact(&contact(3));
        assert!(out.contains("Id:       3"));
        assert!(out.contains("Email:    ann@example.com"));
        assert!(out.contains("Notes:    -"));
    }
}
