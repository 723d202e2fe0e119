diesel::table! {
    prices (id) {
        id -> BigInt,
        coin -> Text,
        price -> Double,
        timestamp -> Timestamp,
    }
}
