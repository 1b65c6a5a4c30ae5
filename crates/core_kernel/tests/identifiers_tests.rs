//! Unit tests for the Identifiers module
//!
//! Tests cover identifier creation, parsing, conversion, and display
//! formatting for the domain identifier types.

use core_kernel::{
    InvestorId, FundId, ShareClassId, CashAccountId, UnitAccountId,
    CashEntryId, UnitEntryId, OrderId, NavId, InstrumentId,
};
use uuid::Uuid;

mod creation {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = OrderId::new();
        let id2 = OrderId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = CashEntryId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = CashEntryId::new_v7();
        let uuid1: Uuid = id1.into();
        let uuid2: Uuid = id2.into();
        assert!(uuid1 < uuid2);
    }

    #[test]
    fn test_default_creates_valid_id() {
        let id = FundId::default();
        assert!(!id.as_uuid().is_nil());
    }
}

mod display_and_parsing {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(InvestorId::prefix(), "INV");
        assert_eq!(FundId::prefix(), "FND");
        assert_eq!(ShareClassId::prefix(), "CLS");
        assert_eq!(CashAccountId::prefix(), "CSH");
        assert_eq!(UnitAccountId::prefix(), "UNT");
        assert_eq!(CashEntryId::prefix(), "CMV");
        assert_eq!(UnitEntryId::prefix(), "UMV");
        assert_eq!(OrderId::prefix(), "ORD");
        assert_eq!(NavId::prefix(), "NAV");
        assert_eq!(InstrumentId::prefix(), "INS");
    }

    #[test]
    fn test_display_includes_prefix() {
        let id = NavId::new();
        assert!(id.to_string().starts_with("NAV-"));
    }

    #[test]
    fn test_parse_round_trip_with_prefix() {
        let original = UnitAccountId::new();
        let parsed: UnitAccountId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_parse_bare_uuid() {
        let uuid = Uuid::new_v4();
        let parsed: InstrumentId = uuid.to_string().parse().unwrap();
        assert_eq!(parsed.as_uuid(), &uuid);
    }

    #[test]
    fn test_parse_invalid_string_fails() {
        let result: Result<OrderId, _> = "not-a-uuid".parse();
        assert!(result.is_err());
    }
}

mod conversion {
    use super::*;

    #[test]
    fn test_uuid_round_trip() {
        let uuid = Uuid::new_v4();
        let id = InvestorId::from(uuid);
        let back: Uuid = id.into();
        assert_eq!(uuid, back);
    }

    #[test]
    fn test_serde_transparent() {
        let id = FundId::new();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: FundId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
        // Serialized form is the bare UUID, not the prefixed display form
        assert!(!json.contains("FND-"));
    }
}
