//! Plain-text rendering of the view models.
use std::fmt::Write;

use client_frontend_core::{
    CardView, ComparisonTray, FilterControls, FilterGroupView, MessageEntry, MessageLevel,
    ResultsHeader,
};
use gallery_core::StatKind;

pub fn header(header: &ResultsHeader) -> String {
    let mut out = format!("{} ({})  sort: {}", header.title, header.count, header.sort);
    if !header.chips.is_empty() {
        let chips: Vec<_> = header
            .chips
            .iter()
            .map(|chip| format!("[{} x]", chip.label))
            .collect();
        let _ = write!(out, "\n  {}", chips.join(" "));
    }
    if let Some(text) = header.empty_text {
        let _ = write!(out, "\n  {text}");
    }
    out
}

pub fn card(card: &CardView, show_image: bool) -> String {
    let mut out = format!("#{}  rank {} ({})", card.id, card.rank_label(), card.score_label());
    if let Some(tier) = card.tier {
        let _ = write!(out, "  {tier}");
    }
    if card.is_new {
        out.push_str("  NEW");
    }
    if card.removable {
        out.push_str("  [remove]");
    }
    if let Some((kind, value)) = card.highlighted {
        let _ = write!(out, "  * {kind} {value}");
    }

    if show_image {
        let _ = write!(out, "\n    image: {}", card.image);
    }
    for line in &card.traits {
        let _ = write!(out, "\n    {}: {}", line.label, line.value);
        if let Some(affinity) = &line.affinity {
            let _ = write!(out, " [{affinity}]");
        }
        if !line.modifiers.is_empty() {
            let modifiers: Vec<_> = line
                .modifiers
                .iter()
                .map(|(name, amount)| format!("{amount:+} {name}"))
                .collect();
            let _ = write!(out, " ({})", modifiers.join(", "));
        }
    }
    if let Some(stats) = card.stats {
        let stats: Vec<_> = StatKind::all()
            .into_iter()
            .map(|kind| format!("{kind} {}", stats.get(kind)))
            .collect();
        let _ = write!(out, "\n    {}", stats.join(", "));
    }
    out
}

pub fn tray(tray: &ComparisonTray, show_images: bool) -> String {
    if tray.is_empty() {
        return "Comparison tray is empty".to_owned();
    }
    let mut out = format!("Comparing {} Kamigotchi", tray.len());
    for entry in &tray.cards {
        let _ = write!(out, "\n{}", card(entry, show_images));
    }
    out
}

pub fn group(group: &FilterGroupView) -> String {
    let mut out = format!("{} ({} selected)", group.label, group.selected_count());
    if let Some(message) = group.empty_message() {
        let _ = write!(out, "\n  {message}");
        return out;
    }
    for option in group.visible_options() {
        let mark = if option.selected { "x" } else { " " };
        let _ = write!(
            out,
            "\n  [{mark}] {} {} ({}%)",
            option.value, option.count, option.percent
        );
        if let Some(affinity) = &option.affinity {
            let _ = write!(out, " [{affinity}]");
        }
    }
    out
}

/// One line per category.
pub fn controls_summary(controls: &FilterControls) -> String {
    let lines: Vec<_> = controls
        .groups
        .iter()
        .map(|group| {
            format!(
                "{}: {} values, {} selected",
                group.label,
                group.options.len(),
                group.selected_count()
            )
        })
        .collect();
    lines.join("\n")
}

pub fn message(entry: &MessageEntry) -> String {
    match entry.level {
        MessageLevel::Info => entry.text.clone(),
        MessageLevel::Warning => format!("warning: {}", entry.text),
        MessageLevel::Error => format!("error: {}", entry.text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_frontend_core::{FilterChip, TraitLine, view_model::NO_MATCHES_TEXT};
    use gallery_core::{ItemId, RarityTier, SortOrder, StatBlock};

    fn sample_card() -> CardView {
        CardView {
            id: ItemId::from("7"),
            image: "https://img/7.png".into(),
            traits: vec![TraitLine {
                category: "body".into(),
                label: "Body".into(),
                value: "red".into(),
                affinity: Some("fire".into()),
                modifiers: vec![("power".into(), 2)],
            }],
            rank: Some(3),
            score: Some(0.5),
            tier: Some(RarityTier::Rare),
            stats: Some(StatBlock::new(50, 10, 5, 8)),
            highlighted: Some((StatKind::Power, 10)),
            is_new: true,
            removable: false,
        }
    }

    #[test]
    fn card_lists_rarity_traits_and_stats() {
        let text = card(&sample_card(), true);
        assert!(text.starts_with("#7  rank #3 (0.5000)  rare  NEW  * power 10"));
        assert!(text.contains("image: https://img/7.png"));
        assert!(text.contains("Body: red [fire] (+2 power)"));
        assert!(text.contains("health 50, power 10, violence 5, harmony 8"));
        assert!(!card(&sample_card(), false).contains("image:"));
    }

    #[test]
    fn header_shows_chips_and_empty_text() {
        let text = header(&ResultsHeader {
            title: "Found matching Kamigotchi",
            count: 0,
            sort: SortOrder::Latest,
            chips: vec![FilterChip {
                category: "body".into(),
                value: "red".into(),
                label: "Body: red".into(),
            }],
            empty_text: Some(NO_MATCHES_TEXT),
        });
        assert_eq!(
            text,
            format!("Found matching Kamigotchi (0)  sort: latest\n  [Body: red x]\n  {NO_MATCHES_TEXT}")
        );
    }

    #[test]
    fn messages_are_prefixed_by_level() {
        let entry = MessageEntry::new("boom", MessageLevel::Error);
        assert_eq!(message(&entry), "error: boom");
    }
}
