pub mod category;
pub mod customer;
pub mod order_line;
pub mod page;
pub mod product;
pub mod quick_order;
pub mod variant;

pub use category::Entity as Category;
pub use category::Model as CategoryModel;
pub use customer::Entity as Customer;
pub use customer::Model as CustomerModel;
pub use order_line::Entity as OrderLine;
pub use order_line::Model as OrderLineModel;
pub use page::Entity as Page;
pub use page::Model as PageModel;
pub use product::Entity as Product;
pub use product::Gender;
pub use product::Model as ProductModel;
pub use quick_order::Entity as QuickOrder;
pub use quick_order::Model as QuickOrderModel;
pub use variant::Entity as Variant;
pub use variant::Model as VariantModel;
