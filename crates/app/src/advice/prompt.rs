//! System instruction and canned replies for the shopping assistant.

use storefront::{pricing::format_kwanza, products::Product};

/// Marker shown next to sold-out products.
pub const SOLD_OUT_MARKER: &str = "[ESGOTADO]";

/// First message of every chat.
pub const GREETING: &str =
    "Olá! Sou o assistente da MelKids. 🧸 Posso ajudar você a encontrar o presente perfeito?";

/// Reply when the model answers with nothing.
pub const EMPTY_REPLY: &str = "Desculpe, não entendi. Pode repetir?";

/// Reply when the model cannot be reached.
pub const FAILURE_REPLY: &str =
    "Tive um pequeno problema para pensar agora. Tente novamente em instantes!";

/// One catalog line: `name (category) - [ESGOTADO] 8 500 Kz`.
#[must_use]
pub fn catalog_line(product: &Product) -> String {
    let marker = if product.sold_out { SOLD_OUT_MARKER } else { "" };

    format!(
        "{} ({}) - {} {}",
        product.name,
        product.category,
        marker,
        format_kwanza(product.price)
    )
}

/// Instruction framing the assistant as the store's helper, with the
/// current catalog embedded.
#[must_use]
pub fn system_instruction(store_name: &str, catalog: &[Product]) -> String {
    let products: Vec<String> = catalog.iter().map(catalog_line).collect();

    format!(
        "Você é o assistente virtual amigável da loja {store_name} em Angola.\n\
         Seu objetivo é ajudar pais e tios a escolherem presentes ou roupas para crianças.\n\
         Seja breve, divertido e use emojis.\n\
         Os preços estão em Kwanzas (Kz), no formato \"8 500 Kz\".\n\
         \n\
         Aqui está o nosso catálogo atual:\n\
         {}\n\
         \n\
         Se o usuário perguntar sobre algo que temos, sugira o produto exato.\n\
         Se estiver esgotado, avise.\n\
         Se perguntar sobre tamanhos, dê dicas gerais para crianças \
         (ex: roupas maiores para crescer).\n\
         Nunca invente produtos que não estão na lista acima.",
        products.join("\n")
    )
}
