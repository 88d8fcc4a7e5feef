//! # Commands Module
//!
//! Everything the shopper can do, as methods on [`Kiosk`](crate::Kiosk).
//!
//! ## Command Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Kiosk Commands                                    │
//! │                                                                         │
//! │  session.rs        welcome.rs        scan.rs                            │
//! │  ──────────        ──────────        ───────                            │
//! │  launch            start_shopping    open_camera                        │
//! │  navigate                            scan                               │
//! │  enter_home                          on_code_detected                   │
//! │  logout                              rescan                             │
//! │  expire_session                      close_camera                       │
//! │                                                                         │
//! │  product.rs        cart.rs           purchase.rs                        │
//! │  ──────────        ───────           ───────────                        │
//! │  set_search_code   remove_item       purchase                           │
//! │  search            remove_line       close_modal                        │
//! │  search_product    clear_list                                           │
//! │  add_to_cart       calculate_total                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod product;
mod purchase;
mod scan;
mod session;
mod welcome;
