//! Handoff message
//!
//! Text sent to the store's messaging contact once an order is saved.

use crate::{orders::Order, pricing::format_kwanza};

/// Bank account shoppers transfer payment to.
pub const PAYMENT_IBAN: &str = "AO06 0040 0000 1234 5678 9012 3";

/// Holder of [`PAYMENT_IBAN`].
pub const PAYMENT_HOLDER: &str = "MelKids Angola Lda.";

/// Compose the order summary: reference, customer block, one bullet per
/// line and the grand total, with `*bold*` section headers.
pub fn compose_order_message(store_name: &str, order: &Order) -> String {
    let customer = &order.customer;

    let mut lines = vec![
        format!("*Novo pedido {store_name}*"),
        format!("*Referência:* {}", order.reference),
        String::new(),
        "*Cliente*".to_string(),
        format!("Nome: {}", customer.name.trim()),
        format!("Telefone: {}", customer.phone.trim()),
        format!("Endereço: {}", customer.address.trim()),
        String::new(),
        "*Itens*".to_string(),
    ];

    lines.extend(order.items.iter().map(|item| {
        format!(
            "• {}x {} - {}",
            item.quantity,
            item.product.name,
            format_kwanza(item.line_total())
        )
    }));

    lines.extend([
        String::new(),
        format!("*Total: {}*", format_kwanza(order.total)),
        String::new(),
        format!(
            "*Pagamento:* transferência bancária para o IBAN {PAYMENT_IBAN} ({PAYMENT_HOLDER})."
        ),
        "Envie o comprovativo por aqui para confirmarmos a entrega.".to_string(),
    ]);

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;

    use crate::{
        cart::Cart,
        orders::{CustomerDetails, OrderReference},
        products::{Product, ProductId},
    };

    use super::*;

    fn product(id: u64, name: &str, price: u64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price,
            category: "Roupas".to_string(),
            description: String::new(),
            image: String::new(),
            is_new: false,
            sold_out: false,
        }
    }

    #[test]
    fn message_lists_every_line_and_the_total() -> TestResult {
        let mut cart = Cart::new();
        let shoes = product(2, "Tênis Infantil Conforto", 12_000);
        let bibs = product(6, "Kit 3 Babadores", 3500);

        cart.add(&shoes);
        cart.add(&shoes);
        cart.add(&bibs);

        let now = Timestamp::from_millisecond(1_700_000_000_000)?;

        let order = Order::from_cart(
            OrderReference::generate(now, 1),
            now,
            CustomerDetails {
                name: "Ana".to_string(),
                phone: "923000000".to_string(),
                address: "Talatona".to_string(),
            },
            &cart,
        )?;

        let message = compose_order_message("MelKids", &order);

        assert!(message.starts_with("*Novo pedido MelKids*"), "{message}");
        assert!(message.contains(order.reference.as_str()), "{message}");
        assert!(message.contains("Nome: Ana"), "{message}");
        assert!(message.contains("• 2x Tênis Infantil Conforto - 24 000 Kz"), "{message}");
        assert!(message.contains("• 1x Kit 3 Babadores - 3 500 Kz"), "{message}");
        assert!(message.contains("*Total: 27 500 Kz*"), "{message}");
        assert!(message.contains(PAYMENT_IBAN), "{message}");

        Ok(())
    }
}
