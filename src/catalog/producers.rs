//! Compile catalog response entries into [`Response`]s.
//!
//! Every producer built here is total: a missing binding selects the entry's
//! fallback/default text instead of failing.

use super::schema::{ChoicesEntry, LookupEntry, ResponseEntry, TemplateEntry};
use crate::{Bindings, Response};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Build the response for one rule. `captures` are the variable names the
/// rule's pattern can bind. Errors carry a human-readable reason.
pub(crate) fn build(entry: ResponseEntry, captures: &[&str], seed: Option<u64>) -> Result<Response, String> {
    match entry {
        ResponseEntry::Text(text) => Ok(Response::Static(text)),
        ResponseEntry::Template(template) => build_template(template, captures),
        ResponseEntry::Lookup(lookup) => build_lookup(lookup, captures),
        ResponseEntry::Choices(choices) => build_choices(choices, seed),
    }
}

fn placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in regex!(r"\{([a-z])\}").captures_iter(template) {
        let name = caps[1].to_string();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

fn build_template(entry: TemplateEntry, captures: &[&str]) -> Result<Response, String> {
    let names = placeholders(&entry.template);
    if let Some(missing) = names.iter().find(|n| !captures.contains(&n.as_str())) {
        return Err(format!("template placeholder {{{missing}}} is not captured by the pattern"));
    }

    let TemplateEntry { template, fallback } = entry;
    Ok(Response::dynamic(move |vars: &Bindings| {
        if !names.iter().all(|n| vars.contains_key(n)) {
            return fallback.clone();
        }
        regex!(r"\{([a-z])\}")
            .replace_all(&template, |caps: &regex::Captures| vars.get(&caps[1]).cloned().unwrap_or_default())
            .into_owned()
    }))
}

fn build_lookup(entry: LookupEntry, captures: &[&str]) -> Result<Response, String> {
    if !captures.contains(&entry.var.as_str()) {
        return Err(format!("lookup variable {:?} is not captured by the pattern", entry.var));
    }

    let LookupEntry { var, table, default } = entry;
    let table: BTreeMap<String, String> = table.into_iter().map(|(k, v)| (k.to_lowercase(), v)).collect();

    Ok(Response::dynamic(move |vars: &Bindings| {
        vars.get(&var).and_then(|word| table.get(&word.to_lowercase())).cloned().unwrap_or_else(|| default.clone())
    }))
}

fn build_choices(entry: ChoicesEntry, seed: Option<u64>) -> Result<Response, String> {
    if entry.choices.is_empty() {
        return Err("choices must not be empty".to_string());
    }

    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let rng = Mutex::new(rng);
    let choices = entry.choices;

    Ok(Response::dynamic(move |_: &Bindings| {
        // The RNG has no invariant a panicking holder could break.
        let mut rng = rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        choices[rng.gen_range(0..choices.len())].clone()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Bindings {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn template_fills_placeholders_or_falls_back() {
        let entry = TemplateEntry {
            template: "Як давно Вас бентежить {b}?".into(),
            fallback: "Як давно Ви так почуваєтеся?".into(),
        };
        let response = build_template(entry, &["a", "b"]).unwrap();

        assert_eq!(response.produce(&vars(&[("b", "шум")])), "Як давно Вас бентежить шум?");
        assert_eq!(response.produce(&vars(&[("a", "мене")])), "Як давно Ви так почуваєтеся?");
        assert_eq!(response.produce(&Bindings::new()), "Як давно Ви так почуваєтеся?");
    }

    #[test]
    fn template_rejects_uncaptured_placeholders() {
        let entry = TemplateEntry { template: "{z}".into(), fallback: String::new() };
        let err = build_template(entry, &["a"]).unwrap_err();
        assert_eq!(err, "template placeholder {z} is not captured by the pattern");
    }

    #[test]
    fn lookup_is_case_insensitive_with_default() {
        let entry = LookupEntry {
            var: "a".into(),
            table: BTreeMap::from([("Люблю".to_string(), "Що Ви ще любите?".to_string())]),
            default: "Що Ви ще маєте на увазі?".into(),
        };
        let response = build_lookup(entry, &["a"]).unwrap();

        assert_eq!(response.produce(&vars(&[("a", "ЛЮБЛЮ")])), "Що Ви ще любите?");
        assert_eq!(response.produce(&vars(&[("a", "їм")])), "Що Ви ще маєте на увазі?");
        assert_eq!(response.produce(&Bindings::new()), "Що Ви ще маєте на увазі?");
    }

    #[test]
    fn lookup_rejects_uncaptured_variable() {
        let entry = LookupEntry { var: "q".into(), table: BTreeMap::new(), default: String::new() };
        assert!(build_lookup(entry, &[]).is_err());
    }

    #[test]
    fn choices_are_seedable() {
        let options: Vec<String> = (0..8).map(|n| format!("reply {n}")).collect();
        let draw = |seed| {
            let response = build_choices(ChoicesEntry { choices: options.clone() }, Some(seed)).unwrap();
            (0..10).map(|_| response.produce(&Bindings::new())).collect::<Vec<_>>()
        };

        let first = draw(7);
        assert_eq!(first, draw(7));
        assert!(first.iter().all(|r| options.contains(r)));
    }

    #[test]
    fn empty_choices_are_rejected() {
        assert_eq!(build_choices(ChoicesEntry { choices: vec![] }, None).unwrap_err(), "choices must not be empty");
    }
}
