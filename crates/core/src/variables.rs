//! Placeholder discovery and the editor's variable catalog.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::context::DataContext;
use crate::placeholder::{format_placeholder, placeholder_syntax};

/// Unique placeholder paths in `template`, in order of first appearance
pub fn find_variables(template: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    placeholder_syntax()
        .matches(template)
        .into_iter()
        .filter(|found| seen.insert(found.path))
        .map(|found| found.path.to_string())
        .collect()
}

/// `key` wrapped as a placeholder
pub fn format_variable(key: &str) -> String {
    format_placeholder(key)
}

/// A variable authors can insert into a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateVariable {
    pub key: String,
    pub label: String,
    /// Sample value used for previews
    pub example: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableCategory {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub variables: Vec<TemplateVariable>,
}

/// Variables grouped by category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableCatalog {
    pub categories: Vec<VariableCategory>,
}

type CategoryRow = (&'static str, &'static str, &'static str, &'static [(&'static str, &'static str, &'static str)]);

const BUILTIN: &[CategoryRow] = &[
    (
        "customer",
        "Müşteri Bilgileri",
        "👤",
        &[
            ("müşteri_adı", "Müşteri Adı", "Ahmet Yılmaz"),
            ("müşteri_email", "Müşteri E-posta", "ahmet@email.com"),
            ("müşteri_telefon", "Müşteri Telefon", "+90 555 123 4567"),
            ("müşteri_adres", "Müşteri Adresi", "İstanbul, Türkiye"),
        ],
    ),
    (
        "order",
        "Sipariş Bilgileri",
        "📦",
        &[
            ("sipariş_no", "Sipariş Numarası", "ORD-12345"),
            ("sipariş_tarihi", "Sipariş Tarihi", "13.01.2026"),
            ("sipariş_tutarı", "Sipariş Tutarı", "₺1.250,00"),
            ("sipariş_durumu", "Sipariş Durumu", "Kargoya Verildi"),
            ("kargo_takip_no", "Kargo Takip No", "TR123456789"),
            ("kargo_firması", "Kargo Firması", "Yurtiçi Kargo"),
            ("tahmini_teslimat", "Tahmini Teslimat", "15.01.2026"),
        ],
    ),
    (
        "product",
        "Ürün Bilgileri",
        "🛍️",
        &[
            ("ürün_adı", "Ürün Adı", "Akıllı Saat Pro"),
            ("ürün_fiyatı", "Ürün Fiyatı", "₺999,00"),
            ("ürün_miktarı", "Ürün Miktarı", "2 adet"),
            ("ürün_kodu", "Ürün Kodu", "SKU-001"),
        ],
    ),
    (
        "payment",
        "Ödeme Bilgileri",
        "💳",
        &[
            ("ödeme_yöntemi", "Ödeme Yöntemi", "Kredi Kartı"),
            ("ödeme_tutarı", "Ödeme Tutarı", "₺1.250,00"),
            ("ödeme_tarihi", "Ödeme Tarihi", "13.01.2026"),
            ("fatura_no", "Fatura No", "INV-2026-001"),
        ],
    ),
    (
        "company",
        "Şirket Bilgileri",
        "🏢",
        &[
            ("şirket_adı", "Şirket Adı", "ABC Teknoloji Ltd."),
            ("şirket_email", "Şirket E-posta", "info@abctech.com"),
            ("şirket_telefon", "Şirket Telefon", "+90 212 123 4567"),
            ("şirket_adres", "Şirket Adresi", "İstanbul, Türkiye"),
            ("şirket_web", "Web Sitesi", "www.abctech.com"),
            ("logo_url", "Logo URL", "https://example.com/logo.png"),
        ],
    ),
    (
        "date",
        "Tarih & Zaman",
        "📅",
        &[
            ("bugün", "Bugünün Tarihi", "13.01.2026"),
            ("saat", "Şu Anki Saat", "14:30"),
            ("yıl", "Yıl", "2026"),
            ("ay", "Ay", "Ocak"),
        ],
    ),
    (
        "other",
        "Diğer",
        "📝",
        &[
            ("doğrulama_kodu", "Doğrulama Kodu", "123456"),
            ("şifre_sıfırlama_linki", "Şifre Sıfırlama Linki", "https://..."),
            ("aktivasyon_linki", "Aktivasyon Linki", "https://..."),
            ("özel_mesaj", "Özel Mesaj", "Teşekkür ederiz!"),
        ],
    ),
];

impl VariableCatalog {
    /// The variables offered by the template editor
    pub fn builtin() -> Self {
        let categories = BUILTIN
            .iter()
            .map(|(id, label, icon, variables)| VariableCategory {
                id: id.to_string(),
                label: label.to_string(),
                icon: icon.to_string(),
                variables: variables
                    .iter()
                    .map(|(key, label, example)| TemplateVariable {
                        key: key.to_string(),
                        label: label.to_string(),
                        example: example.to_string(),
                    })
                    .collect(),
            })
            .collect();

        Self { categories }
    }

    /// Every variable with its category, flattened in catalog order
    pub fn all(&self) -> impl Iterator<Item = (&VariableCategory, &TemplateVariable)> {
        self.categories
            .iter()
            .flat_map(|category| category.variables.iter().map(move |v| (category, v)))
    }

    pub fn get(&self, key: &str) -> Option<&TemplateVariable> {
        self.all().map(|(_, v)| v).find(|v| v.key == key)
    }

    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.variables.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Context mapping every key to its example value
    pub fn example_context(&self) -> DataContext {
        self.all()
            .fold(DataContext::new(), |ctx, (_, v)| ctx.with(v.key.clone(), v.example.clone()))
    }

    /// Placeholders in `template` the catalog does not know about
    pub fn unknown_variables(&self, template: &str) -> Vec<String> {
        find_variables(template)
            .into_iter()
            .filter(|key| self.get(key).is_none())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::substitute_placeholders;

    #[test]
    fn test_find_variables_is_unique_and_ordered() {
        let template = "[[b]] [[a]] [[b]] [[item.price]] [[a]]";
        assert_eq!(find_variables(template), vec!["b", "a", "item.price"]);
        assert!(find_variables("no placeholders [[]]").is_empty());
    }

    #[test]
    fn test_format_variable() {
        assert_eq!(format_variable("sipariş_no"), "[[sipariş_no]]");
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = VariableCatalog::builtin();
        let ids: Vec<&str> = catalog.categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["customer", "order", "product", "payment", "company", "date", "other"]
        );
        assert_eq!(catalog.len(), 33);
        assert_eq!(
            catalog.get("kargo_firması").map(|v| v.example.as_str()),
            Some("Yurtiçi Kargo")
        );
        assert!(catalog.get("unknown").is_none());

        let (category, first) = catalog.all().next().unwrap();
        assert_eq!(category.id, "customer");
        assert_eq!(first.key, "müşteri_adı");
    }

    #[test]
    fn test_example_context_previews_a_template() {
        let catalog = VariableCatalog::builtin();
        let preview = substitute_placeholders(
            "Merhaba [[müşteri_adı]], siparişiniz [[sipariş_no]] [[custom]]",
            &catalog.example_context(),
        );
        assert_eq!(preview, "Merhaba Ahmet Yılmaz, siparişiniz ORD-12345 [[custom]]");
    }

    #[test]
    fn test_unknown_variables() {
        let catalog = VariableCatalog::builtin();
        assert_eq!(
            catalog.unknown_variables("[[saat]] [[item.name]] [[yıl]] [[x]]"),
            vec!["item.name", "x"]
        );
    }
}
