use tessera_core::{EventClass, HookEventKind};
use windows::Win32::UI::WindowsAndMessaging::{
    EVENT_OBJECT_DESTROY, EVENT_OBJECT_HIDE, EVENT_OBJECT_SHOW, EVENT_SYSTEM_MOVESIZEEND,
    EVENT_SYSTEM_MOVESIZESTART,
};

/// Translates a raw WinEvent code into a notification kind.
///
/// Returns `None` for codes outside the tracked set. Object and child
/// filtering happens later, in the manager.
pub fn translate(event: u32) -> Option<HookEventKind> {
    match event {
        e if e == EVENT_SYSTEM_MOVESIZESTART => Some(HookEventKind::MoveSizeStart),
        e if e == EVENT_SYSTEM_MOVESIZEEND => Some(HookEventKind::MoveSizeEnd),
        e if e == EVENT_OBJECT_SHOW => Some(HookEventKind::Show),
        e if e == EVENT_OBJECT_HIDE => Some(HookEventKind::Hide),
        e if e == EVENT_OBJECT_DESTROY => Some(HookEventKind::Destroy),
        _ => None,
    }
}

/// Returns the inclusive WinEvent code range a hook for `class` covers.
pub fn range(class: EventClass) -> (u32, u32) {
    match class {
        EventClass::MoveSize => (EVENT_SYSTEM_MOVESIZESTART, EVENT_SYSTEM_MOVESIZEEND),
        EventClass::Show => (EVENT_OBJECT_SHOW, EVENT_OBJECT_SHOW),
        EventClass::Hide => (EVENT_OBJECT_HIDE, EVENT_OBJECT_HIDE),
        EventClass::Destroy => (EVENT_OBJECT_DESTROY, EVENT_OBJECT_DESTROY),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_known_codes() {
        assert_eq!(translate(0x000A), Some(HookEventKind::MoveSizeStart));
        assert_eq!(translate(0x000B), Some(HookEventKind::MoveSizeEnd));
        assert_eq!(translate(0x8002), Some(HookEventKind::Show));
        assert_eq!(translate(0x8003), Some(HookEventKind::Hide));
        assert_eq!(translate(0x8001), Some(HookEventKind::Destroy));
    }

    #[test]
    fn translate_ignores_untracked_codes() {
        // EVENT_SYSTEM_FOREGROUND and EVENT_OBJECT_CREATE
        assert_eq!(translate(0x0003), None);
        assert_eq!(translate(0x8000), None);
    }

    #[test]
    fn every_translated_kind_falls_in_its_class_range() {
        for code in [0x000A, 0x000B, 0x8001, 0x8002, 0x8003] {
            let kind = translate(code).unwrap();
            let (min, max) = range(kind.class());
            assert!((min..=max).contains(&code), "{code:#X} outside {kind:?}");
        }
    }

    #[test]
    fn ranges_do_not_overlap() {
        let ranges: Vec<_> = EventClass::ALL.iter().map(|c| range(*c)).collect();
        for (i, a) in ranges.iter().enumerate() {
            for b in &ranges[i + 1..] {
                assert!(a.1 < b.0 || b.1 < a.0, "{a:?} overlaps {b:?}");
            }
        }
    }
}
