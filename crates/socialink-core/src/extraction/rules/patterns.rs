//! Ordered pattern tables for diploma and certificate field extraction.
//!
//! Each table is evaluated top to bottom and the first rule that matches
//! wins, so the order of entries is significant.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Titles: lead-in keyword, optional "de"/"en", rest of the line
    pub static ref TITLE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)\bdipl[ôo]me[ \t]+(?:(?:de|en)[ \t]+)?(\S[^\n]*)").unwrap(),
        Regex::new(r"(?i)\bcertificat[ \t]+(?:(?:de|en)[ \t]+)?(\S[^\n]*)").unwrap(),
        Regex::new(r"(?i)\battestation[ \t]+(?:(?:de|en)[ \t]+)?(\S[^\n]*)").unwrap(),
        Regex::new(r"(?i)\blicence[ \t]+(?:(?:de|en)[ \t]+)?(\S[^\n]*)").unwrap(),
        Regex::new(r"(?i)\bmaster[ \t]+(?:(?:de|en)[ \t]+)?(\S[^\n]*)").unwrap(),
        Regex::new(r"(?i)\bdoctorat[ \t]+(?:(?:de|en)[ \t]+)?(\S[^\n]*)").unwrap(),
        Regex::new(r"(?i)\bbaccalaur[ée]at\b").unwrap(),
    ];

    // Issuing bodies: lead-in keyword, rest of the line
    pub static ref INSTITUTION_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)\buniversit[ée][ \t]+(\S[^\n]*)").unwrap(),
        Regex::new(r"(?i)\bfacult[ée][ \t]+(\S[^\n]*)").unwrap(),
        Regex::new(r"(?i)\b[ée]cole[ \t]+(\S[^\n]*)").unwrap(),
        Regex::new(r"(?i)\binstitut[ \t]+(\S[^\n]*)").unwrap(),
        Regex::new(r"(?i)\bcentre[ \t]+(\S[^\n]*)").unwrap(),
        Regex::new(r"(?i)\b[ée]tablissement[ \t]+(\S[^\n]*)").unwrap(),
    ];

    // Issue dates, stored as the whole match
    pub static ref DATE_PATTERNS: Vec<Regex> = vec![
        // 15/06/2018, 15-06-2018, 15.06.2018
        Regex::new(r"\b\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2,4}\b").unwrap(),
        // 2018/06/15
        Regex::new(r"\b\d{4}[/.\-]\d{1,2}[/.\-]\d{1,2}\b").unwrap(),
        // 15 juin 2018, 1er décembre 2020
        Regex::new(
            r"(?i)\b\d{1,2}(?:er)?[ \t]+(?:janvier|f[ée]vrier|mars|avril|mai|juin|juillet|ao[ûu]t|septembre|octobre|novembre|d[ée]cembre)[ \t]+\d{4}\b"
        ).unwrap(),
        // Labeled dates tolerate OCR spacing around separators
        Regex::new(
            r"(?i)\bd[ée]livr[ée]e?[ \t]+le[ \t]*:?[ \t]*\d{1,2}[ \t]*[/.\-][ \t]*\d{1,2}[ \t]*[/.\-][ \t]*\d{2,4}\b"
        ).unwrap(),
        Regex::new(
            r"(?i)\bobtenue?[ \t]+le[ \t]*:?[ \t]*\d{1,2}[ \t]*[/.\-][ \t]*\d{1,2}[ \t]*[/.\-][ \t]*\d{2,4}\b"
        ).unwrap(),
        Regex::new(
            r"(?i)\bdate[ \t]*:[ \t]*\d{1,2}[ \t]*[/.\-][ \t]*\d{1,2}[ \t]*[/.\-][ \t]*\d{2,4}\b"
        ).unwrap(),
    ];

    // Reference, matricule and national ID numbers
    pub static ref NUMBER_PATTERNS: Vec<Regex> = vec![
        Regex::new(
            r"(?i)\bn(?:[°º]|o\b)\.?[ \t]*(?:(?:[ée]tudiant|matricule|s[ée]rie)[ \t]*)?:?[ \t]*([A-Z0-9][A-Z0-9/\-]*)"
        ).unwrap(),
        Regex::new(r"(?i)\bmatricule[ \t]*:[ \t]*([A-Z0-9][A-Z0-9/\-]*)").unwrap(),
        Regex::new(r"(?i)\br[ée]f[ée]rence[ \t]*:[ \t]*([A-Z0-9][A-Z0-9/\-]*)").unwrap(),
        Regex::new(r"(?i)\bcin[ \t]*:[ \t]*([A-Z]{1,2}[0-9]+)").unwrap(),
        Regex::new(
            r"(?i)\bcarte[ \t]+nationale(?:[ \t]+d'identit[ée])?[ \t]*:[ \t]*([A-Z]{1,2}[0-9]+)"
        ).unwrap(),
    ];
}

/// Moroccan universities and schools recognized by name fragment when no
/// lead-in keyword is present. Searched case-insensitively, in order.
pub static KNOWN_INSTITUTIONS: &[&str] = &[
    "Mohammed V",
    "Hassan II",
    "Cadi Ayyad",
    "Ibn Tofail",
    "Ibn Zohr",
    "Sidi Mohamed Ben Abdellah",
    "Abdelmalek Essaadi",
    "Mohammed Premier",
    "Moulay Ismail",
    "Chouaib Doukkali",
    "Sultan Moulay Slimane",
    "Hassan 1er",
    "Al Akhawayn",
    "INAS",
    "ENSA",
    "ENCG",
    "FSJES",
    "FST",
];
