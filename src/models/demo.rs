use serde::Serialize;

/// `GET /api/data`가 돌려주는 고정 항목
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DemoItem {
    pub id: i32,
    pub name: &'static str,
}

/// 데모 변형이 항상 반환하는 두 항목
pub const DEMO_ITEMS: [DemoItem; 2] = [
    DemoItem { id: 1, name: "Item 1" },
    DemoItem { id: 2, name: "Item 2" },
];
