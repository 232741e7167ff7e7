use crate::render::render_to_string;
use indexadmin::ui::components::tooltip::placement;
use indexadmin::ui::components::{TooltipContent, TooltipProvider, TooltipTrigger};
use ratatui::layout::Rect;

#[test]
fn test_trigger_toggle_goes_through_provider() {
    let mut provider = TooltipProvider::new();
    let trigger = TooltipTrigger::new("client-id");

    trigger.toggle(&mut provider);
    assert!(provider.is_open("client-id"));
    trigger.toggle(&mut provider);
    assert!(!provider.is_open("client-id"));
}

#[test]
fn test_trigger_registers_its_anchor() {
    let mut provider = TooltipProvider::new();
    render_to_string(40, 5, |f, _| {
        TooltipTrigger::new("help").render(f, Rect::new(5, 2, 20, 1), &mut provider);
    });
    assert_eq!(provider.anchor("help"), Some(Rect::new(5, 2, 3, 1)));
}

#[test]
fn test_content_only_renders_when_open() {
    let mut provider = TooltipProvider::new();
    provider.register_anchor("help", Rect::new(2, 1, 3, 1));

    let closed = render_to_string(40, 8, |f, _| {
        TooltipContent::new("Consumer key").render(f, &provider, "help");
    });
    assert!(!closed.contains("Consumer key"));

    provider.open("help");
    let open = render_to_string(40, 8, |f, _| {
        TooltipContent::new("Consumer key").render(f, &provider, "help");
    });
    let lines: Vec<&str> = open.lines().collect();
    // Panel starts on the row below the trigger
    assert!(lines[3].contains("Consumer key"));
}

#[test]
fn test_content_size_overrides() {
    let content = TooltipContent::new("short").width(30).height(6);
    assert_eq!(content.size(), (30, 6));

    let natural = TooltipContent::new("short");
    assert_eq!(natural.size(), (9, 3));
}

#[test]
fn test_placement_never_leaves_bounds() {
    let bounds = Rect::new(0, 0, 40, 10);
    for x in 0..40 {
        for y in 0..10 {
            let area = placement(Rect::new(x, y, 3, 1), 20, 4, bounds);
            assert!(area.right() <= bounds.right(), "x overflow at {},{}", x, y);
            assert!(area.bottom() <= bounds.bottom(), "y overflow at {},{}", x, y);
        }
    }
}
