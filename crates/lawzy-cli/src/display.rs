//! Terminal rendering for the analysis dashboard, suggestions, drafts, and
//! practice cards.

use lawzy_core::{
    CaseAnalysis, Difficulty, DocumentDraft, PracticeCard, StatuteSection, Suggestion, signal_label,
};

const MAX_LIST_ITEMS: usize = 10;

// ── Public API ──

/// Print the analysis as a vertical card grouped by dashboard section.
pub fn print_analysis_card(analysis: &CaseAnalysis) {
    println!("=== Legal Analysis ===");
    println!("\"{}\"", analysis.normalized_query.english_version);
    if let Some(lang) = &analysis.normalized_query.language {
        println!("  detected language: {lang}");
    }
    println!();

    print_paragraph("Simple Explanation", &analysis.plain_language_summary);
    print_sections(
        "IPC Sections (Existing)",
        &analysis.ipc_sections,
        "No specific IPC sections applicable.",
    );
    print_sections(
        "BNS Sections (New Law)",
        &analysis.bns_sections,
        "No specific BNS sections applicable.",
    );
    print_guidance(analysis);
    print_signals(analysis);
    print_list("Clarifications Needed", &analysis.missing_information);
    print_paragraph("Limitations", &analysis.limitations);
}

pub fn print_suggestions(suggestions: &[Suggestion]) {
    if suggestions.is_empty() {
        println!("No document suggestions for this case.");
        return;
    }
    println!("Suggested documents");
    for (i, s) in suggestions.iter().enumerate() {
        println!("  [{}] {}", i + 1, s.title);
        if !s.description.is_empty() {
            println!("      {}", s.description);
        }
    }
    println!();
}

pub fn print_draft(draft: &DocumentDraft) {
    println!("=== {} ===", draft.title.to_uppercase());
    println!();
    println!("{}", draft.content);
    println!();
}

/// One practice card; `purpose` only when revealed.
pub fn print_card(card: &PracticeCard, position: (usize, usize), revealed: bool) {
    println!("Phase {} of {}", position.0, position.1);
    println!("  {:<12} {}", "category", card.category);
    println!("  {:<12} {}", "difficulty", difficulty_meter(card.difficulty));
    println!();
    println!("  {}", card.question);
    println!();
    if revealed {
        println!("  Tactical insight: {}", card.purpose);
        println!();
    }
}

/// Five-slot meter, e.g. `●●●○○`.
pub fn difficulty_meter(difficulty: Difficulty) -> String {
    let filled = difficulty.get() as usize;
    let empty = usize::from(Difficulty::MAX) - filled;
    format!("{}{}", "●".repeat(filled), "○".repeat(empty))
}

// ── Section rendering ──

fn print_paragraph(header: &str, text: &str) {
    if text.trim().is_empty() {
        return;
    }
    println!("{header}");
    for line in text.lines() {
        println!("  {line}");
    }
    println!();
}

fn print_sections(header: &str, sections: &[StatuteSection], none: &str) {
    println!("{header}");
    if sections.is_empty() {
        println!("  {none}");
        println!();
        return;
    }
    for s in sections.iter().take(MAX_LIST_ITEMS) {
        println!("  Section {} - {}", s.section_number, s.title);
        println!("    {}", s.explanation);
    }
    if sections.len() > MAX_LIST_ITEMS {
        println!("  ... and {} more", sections.len() - MAX_LIST_ITEMS);
    }
    println!();
}

fn print_guidance(analysis: &CaseAnalysis) {
    let paths = &analysis.procedural_guidance.paths_explained;
    println!("Recommended Next Steps");
    println!("  {:<14} {}", "Police Route", paths.police_route);
    println!("  {:<14} {}", "Court Route", paths.court_route);
    println!("  {:<14} {}", "Alternative", paths.non_legal_resolution);
    for action in &analysis.procedural_guidance.possible_actions {
        println!("  • {action}");
    }
    println!();
}

fn print_signals(analysis: &CaseAnalysis) {
    if analysis.legal_signal_checklist.is_empty() {
        return;
    }
    println!("Legal Signals");
    for (key, raised) in &analysis.legal_signal_checklist {
        println!(
            "  {:<26} {}",
            signal_label(key),
            if *raised { "YES" } else { "no" }
        );
    }
    println!();
}

fn print_list(header: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("{header}");
    for item in items.iter().take(MAX_LIST_ITEMS) {
        println!("  ? {item}");
    }
    if items.len() > MAX_LIST_ITEMS {
        println!("  ... and {} more", items.len() - MAX_LIST_ITEMS);
    }
    println!();
}
