use std::io::{self, BufRead};

use crate::clipboard::{copy_or_warn, SystemClipboard};
use crate::config::AppConfig;
use crate::coords::{
    chunk, convert_keeping_race, extract_faction, process_with, ChunkSize, Dialect, Faction,
};
use crate::data::registry::load_registry;
use crate::data::validate::{validate_catalog_dir, ValidationSeverity};
use crate::data::{Catalog, Skill};
use crate::lookup::{available_maps, lookup, LookupQuery};
use crate::prefs::{load_prefs, save_prefs, validate_level, Preferences};
use crate::render::{render_chunks, render_lookup};

const USAGE: &str = "usage: aion_coords <lookup|maps|convert|faction|validate|prefs|sources>";
const LOOKUP_USAGE: &str = "usage: aion_coords lookup [--race elyos|asmodian] [--skill aethertapping|essencetapping] [--level N] [--map KEY] [--format newer|older] [--chunk-size N] [--json]";
const MAPS_USAGE: &str =
    "usage: aion_coords maps [--race elyos|asmodian] [--skill aethertapping|essencetapping] [--level N]";
const CONVERT_USAGE: &str = "usage: aion_coords convert [--format newer|older] [--race elyos|asmodian] [--chunk-size N] [--copy N] < tags.txt";
const FACTION_USAGE: &str = "usage: aion_coords faction <tag>";
const PREFS_USAGE: &str =
    "usage: aion_coords prefs <show|set <race|skill|level|format> <value>|clear-level>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Lookup,
    Maps,
    Convert,
    Faction,
    Validate,
    Prefs,
    Sources,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("lookup") => Some(Command::Lookup),
        Some("maps") => Some(Command::Maps),
        Some("convert") => Some(Command::Convert),
        Some("faction") => Some(Command::Faction),
        Some("validate") => Some(Command::Validate),
        Some("prefs") => Some(Command::Prefs),
        Some("sources") => Some(Command::Sources),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    let config = AppConfig::from_env();
    match parse_command(args) {
        Some(Command::Lookup) => handle_lookup(args, &config),
        Some(Command::Maps) => handle_maps(args, &config),
        Some(Command::Convert) => handle_convert(args, &config),
        Some(Command::Faction) => handle_faction(args),
        Some(Command::Validate) => handle_validate(args, &config),
        Some(Command::Prefs) => handle_prefs(args, &config),
        Some(Command::Sources) => handle_sources(&config),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

/// Value of `--name value` or `--name=value`.
fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    let prefix = format!("{name}=");
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == name {
            return iter.next().map(String::as_str);
        }
        if let Some(value) = arg.strip_prefix(&prefix) {
            return Some(value);
        }
    }
    None
}

fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|arg| arg == name)
}

fn parse_flag<T: std::str::FromStr<Err = String>>(
    args: &[String],
    name: &str,
) -> Result<Option<T>, String> {
    flag_value(args, name)
        .map(|raw| raw.parse::<T>().map_err(|err| format!("{name}: {err}")))
        .transpose()
}

fn parse_level_flag(args: &[String]) -> Result<Option<u32>, String> {
    let Some(raw) = flag_value(args, "--level") else {
        return Ok(None);
    };
    let level = raw
        .parse::<u32>()
        .map_err(|_| format!("--level: invalid level '{raw}'"))?;
    validate_level(level)
        .map(Some)
        .map_err(|err| format!("--level: {err}"))
}

/// Race and skill from flags, falling back to saved preferences.
fn resolve_selection(args: &[String], prefs: &Preferences) -> Result<(Faction, Skill), String> {
    let race = parse_flag::<Faction>(args, "--race")?
        .or(prefs.race)
        .ok_or_else(|| "no race given and none saved (use --race)".to_string())?;
    let skill = parse_flag::<Skill>(args, "--skill")?
        .or(prefs.skill)
        .ok_or_else(|| "no skill given and none saved (use --skill)".to_string())?;
    Ok((race, skill))
}

fn build_query(
    args: &[String],
    prefs: &Preferences,
    config: &AppConfig,
) -> Result<(LookupQuery, bool), String> {
    let (faction, skill) = resolve_selection(args, prefs)?;
    let level = parse_level_flag(args)?.or_else(|| prefs.level_for(faction, skill));
    let dialect = parse_flag::<Dialect>(args, "--format")?.unwrap_or(prefs.format);
    let chunk_size = parse_flag::<ChunkSize>(args, "--chunk-size")?.unwrap_or(config.chunk_size);

    let query = LookupQuery {
        faction,
        skill,
        level,
        map: flag_value(args, "--map").map(str::to_string),
        dialect,
        chunk_size,
    };
    Ok((query, has_flag(args, "--json")))
}

fn load_catalog(config: &AppConfig) -> Option<Catalog> {
    match Catalog::load_dir(&config.data_dir) {
        Ok(catalog) => Some(catalog),
        Err(err) => {
            eprintln!("failed to load catalog: {err}");
            None
        }
    }
}

fn handle_lookup(args: &[String], config: &AppConfig) -> i32 {
    let prefs = load_prefs(&config.prefs_path);
    let (query, as_json) = match build_query(args, &prefs, config) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("{LOOKUP_USAGE}");
            return 2;
        }
    };
    let Some(catalog) = load_catalog(config) else {
        return 1;
    };

    let result = match lookup(&catalog, &query) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("lookup failed: {err}");
            return 1;
        }
    };

    if as_json {
        match serde_json::to_string_pretty(&result) {
            Ok(payload) => println!("{payload}"),
            Err(err) => {
                eprintln!("failed to serialize lookup result: {err}");
                return 1;
            }
        }
    } else {
        print!("{}", render_lookup(&result));
    }
    0
}

fn handle_maps(args: &[String], config: &AppConfig) -> i32 {
    let prefs = load_prefs(&config.prefs_path);
    let parsed = resolve_selection(args, &prefs).and_then(|(faction, skill)| {
        let level = parse_level_flag(args)?.or_else(|| prefs.level_for(faction, skill));
        Ok((faction, skill, level))
    });
    let (faction, skill, level) = match parsed {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("{MAPS_USAGE}");
            return 2;
        }
    };
    let Some(catalog) = load_catalog(config) else {
        return 1;
    };

    let maps = available_maps(&catalog, faction, skill, level);
    if maps.is_empty() {
        println!("no maps with resources for this selection");
    }
    for (map_key, count) in maps {
        println!("{map_key}\t{count}");
    }
    0
}

type ConvertOptions = (Dialect, Option<Faction>, ChunkSize, Option<usize>);

fn parse_convert_options(
    args: &[String],
    prefs: &Preferences,
    config: &AppConfig,
) -> Result<ConvertOptions, String> {
    let dialect = parse_flag::<Dialect>(args, "--format")?.unwrap_or(prefs.format);
    let race = parse_flag::<Faction>(args, "--race")?;
    let chunk_size = parse_flag::<ChunkSize>(args, "--chunk-size")?.unwrap_or(config.chunk_size);
    let copy = flag_value(args, "--copy")
        .map(|raw| {
            raw.parse::<usize>()
                .ok()
                .filter(|n| *n >= 1)
                .ok_or_else(|| format!("--copy: invalid chunk number '{raw}'"))
        })
        .transpose()?;
    Ok((dialect, race, chunk_size, copy))
}

fn handle_convert(args: &[String], config: &AppConfig) -> i32 {
    let prefs = load_prefs(&config.prefs_path);
    let options = parse_convert_options(args, &prefs, config);
    let (dialect, race, chunk_size, copy) = match options {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("{CONVERT_USAGE}");
            return 2;
        }
    };

    let mut tags = Vec::new();
    for line in io::stdin().lock().lines() {
        match line {
            Ok(line) if line.trim().is_empty() => {}
            Ok(line) => tags.push(line.trim_end_matches('\r').to_string()),
            Err(err) => {
                eprintln!("failed to read stdin: {err}");
                return 1;
            }
        }
    }

    // An explicit --race overrides every digit; a saved race only fills race-less tags.
    let converted = match race {
        Some(race) => process_with(&tags, dialect, Some(race), chunk_size),
        None => tags
            .iter()
            .map(|tag| convert_keeping_race(tag, dialect, prefs.race))
            .collect::<Result<Vec<_>, _>>()
            .map(|converted| chunk(&converted, chunk_size)),
    };
    let chunks = match converted {
        Ok(chunks) => chunks,
        Err(err) => {
            eprintln!("convert failed: {err}");
            return 1;
        }
    };
    print!("{}", render_chunks(&chunks, ""));

    if let Some(number) = copy {
        match chunks.get(number - 1) {
            Some(chunk) => {
                if copy_or_warn(&mut SystemClipboard, &chunk.content) {
                    eprintln!("copied chunk {number}/{}", chunks.len());
                }
            }
            None => log::warn!("--copy {number}: only {} chunk(s) available", chunks.len()),
        }
    }
    0
}

fn handle_faction(args: &[String]) -> i32 {
    if args.len() < 3 {
        eprintln!("{FACTION_USAGE}");
        return 2;
    }
    let tag = args[2..].join(" ");
    match extract_faction(&tag) {
        Some(faction) => println!("{faction}"),
        None => println!("none"),
    }
    0
}

fn handle_validate(args: &[String], config: &AppConfig) -> i32 {
    let dir = args
        .get(2)
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| config.data_dir.clone());

    let report = validate_catalog_dir(&dir);
    for diag in &report.diagnostics {
        match diag.severity {
            ValidationSeverity::Error => eprintln!("- {diag}"),
            ValidationSeverity::Warning | ValidationSeverity::Info => println!("- {diag}"),
        }
    }

    if report.has_errors() {
        eprintln!(
            "validation failed: {} issue(s)",
            report.count(ValidationSeverity::Error)
        );
        1
    } else {
        println!(
            "validation passed: {} nodes in {}",
            report.node_count,
            dir.display()
        );
        0
    }
}

fn handle_prefs(args: &[String], config: &AppConfig) -> i32 {
    let mut prefs = load_prefs(&config.prefs_path);
    let action = args.get(2).map(String::as_str);

    let outcome: Result<bool, String> = match action {
        Some("show") | None => Ok(false),
        Some("clear-level") => prefs.clear_skill_level().map(|()| true).map_err(|e| e.to_string()),
        Some("set") => {
            let key = args.get(3).map(String::as_str);
            let Some(value) = args.get(4) else {
                eprintln!("{PREFS_USAGE}");
                return 2;
            };
            match key {
                Some("race") => value.parse::<Faction>().map(|race| {
                    prefs.race = Some(race);
                    true
                }),
                Some("skill") => value.parse::<Skill>().map(|skill| {
                    prefs.skill = Some(skill);
                    true
                }),
                Some("format") => value.parse::<Dialect>().map(|format| {
                    prefs.format = format;
                    true
                }),
                Some("level") => value
                    .parse::<u32>()
                    .map_err(|_| format!("invalid level '{value}'"))
                    .and_then(|level| prefs.set_skill_level(level).map_err(|e| e.to_string()))
                    .map(|()| true),
                _ => {
                    eprintln!("{PREFS_USAGE}");
                    return 2;
                }
            }
        }
        Some(_) => {
            eprintln!("{PREFS_USAGE}");
            return 2;
        }
    };

    match outcome {
        Ok(changed) => {
            if changed {
                if let Err(err) = save_prefs(&config.prefs_path, &prefs) {
                    eprintln!("failed to save preferences: {err}");
                    return 1;
                }
            }
            match serde_json::to_string_pretty(&prefs) {
                Ok(payload) => {
                    println!("{payload}");
                    0
                }
                Err(err) => {
                    eprintln!("failed to serialize preferences: {err}");
                    1
                }
            }
        }
        Err(msg) => {
            eprintln!("{msg}");
            1
        }
    }
}

fn handle_sources(config: &AppConfig) -> i32 {
    let registry = load_registry(&config.registry_path);
    if registry.is_empty() {
        println!("no dataset registry at {}", config.registry_path.display());
        return 0;
    }
    for (name, entry) in &registry {
        println!(
            "{name}\t{}\t{}\t{}",
            entry.source,
            entry.data_version.as_deref().unwrap_or("-"),
            entry.last_updated.as_deref().unwrap_or("-")
        );
    }
    0
}
