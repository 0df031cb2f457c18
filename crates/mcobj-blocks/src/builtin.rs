//! Classic block table and default material colors.

/// `(id, name, item, transparent)` for the classic block set.
pub(crate) const BLOCK_TYPES: &[(u8, &str, bool, bool)] = &[
    (0, "Air", false, true),
    (1, "Stone", false, false),
    (2, "Grass", false, false),
    (3, "Dirt", false, false),
    (4, "Cobblestone", false, false),
    (5, "Wooden Plank", false, false),
    (6, "Sapling", true, true),
    (7, "Bedrock", false, false),
    (8, "Water", false, true),
    (9, "Stationary water", false, true),
    (10, "Lava", false, true),
    (11, "Stationary lava", false, true),
    (12, "Sand", false, false),
    (13, "Gravel", false, false),
    (14, "Gold ore", false, false),
    (15, "Iron ore", false, false),
    (16, "Coal ore", false, false),
    (17, "Wood", false, false),
    (18, "Leaves", false, true),
    (19, "Sponge", true, true),
    (20, "Glass", false, true),
    (21, "Lapis Lazuli Ore", false, false),
    (22, "Lapis Lazuli Block", false, false),
    (23, "Dispenser", false, false),
    (24, "Sandstone", false, false),
    (25, "Note Block", false, false),
    (26, "Bed", true, true),
    (35, "Wool", false, false),
    (37, "Yellow flower", true, true),
    (38, "Red rose", true, true),
    (39, "Brown Mushroom", true, true),
    (40, "Red Mushroom", true, true),
    (41, "Gold Block", false, false),
    (42, "Iron Block", false, false),
    (43, "Double Stone Slab", false, false),
    (44, "Stone Slab", true, true),
    (45, "Brick", false, false),
    (46, "TNT", false, false),
    (47, "Bookshelf", false, false),
    (48, "Moss Stone", false, false),
    (49, "Obsidian", false, false),
    (50, "Torch", true, true),
    (51, "Fire", true, true),
    (52, "Monster Spawner", true, true),
    (53, "Wooden Stairs", true, true),
    (54, "Chest", false, false),
    (55, "Redstone Wire", true, true),
    (56, "Diamond Ore", false, false),
    (57, "Diamond Block", false, false),
    (58, "Workbench", false, false),
    (59, "Crops", true, true),
    (60, "Soil", false, false),
    (61, "Furnace", false, false),
    (62, "Burning Furnace", false, false),
    (63, "Sign Post", true, true),
    (64, "Wooden Door", true, true),
    (65, "Ladder", true, true),
    (66, "Minecart Tracks", true, true),
    (67, "Cobblestone Stairs", true, true),
    (68, "Wall Sign", true, true),
    (69, "Lever", true, true),
    (70, "Stone Pressure Plate", true, true),
    (71, "Iron Door", true, true),
    (72, "Wooden Pressure Plate", true, true),
    (73, "Redstone Ore", false, false),
    (74, "Glowing Redstone Ore", false, false),
    (75, "Redstone torch (\"off\" state)", true, true),
    (76, "Redstone torch (\"on\" state)", true, true),
    (77, "Stone Button", true, true),
    (78, "Snow", true, true),
    (79, "Ice", false, true),
    (80, "Snow Block", false, false),
    (81, "Cactus", true, true),
    (82, "Clay", false, false),
    (83, "Sugar Cane", true, true),
    (84, "Jukebox", false, false),
    (85, "Fence", true, true),
    (86, "Pumpkin", false, false),
    (87, "Netherrack", false, false),
    (88, "Soul Sand", false, false),
    (89, "Glowstone", false, false),
    (90, "Portal", false, false),
    (91, "Jack-O-Lantern", false, false),
    (92, "Cake Block", true, true),
    (93, "Redstone Repeater (\"off\" state)", true, true),
    (94, "Redstone Repeater (\"on\" state)", true, true),
];

/// `(id, rgba, name)` default colors.
pub(crate) const COLORS: &[(u8, u32, &str)] = &[
    (1, 0x757575_ff, "Stone"),
    (2, 0x2e6d05_ff, "Grass"),
    (3, 0x593d29_ff, "Dirt"),
    (4, 0x3d3d3d_ff, "Cobblestone"),
    (5, 0x9f844d_ff, "Wooden Plank"),
    (6, 0x7f7f7f_ff, "Sapling"),
    (7, 0x070707_ff, "Bedrock"),
    (8, 0x3d6dff_3f, "Water"),
    (9, 0x3d6dff_3f, "Stationary water"),
    (10, 0x7f7f7f_ff, "Lava"),
    (11, 0x7f7f7f_ff, "Stationary lava"),
    (12, 0xbfb882_ff, "Sand"),
    (13, 0x7f7f7f_ff, "Gravel"),
    (14, 0x7f7f7f_ff, "Gold ore"),
    (15, 0x7f7f7f_ff, "Iron ore"),
    (16, 0x7f7f7f_ff, "Coal ore"),
    (17, 0x675231_ff, "Wood"),
    (18, 0x509026_ff, "Leaves"),
    (19, 0x7f7f7f_ff, "Sponge"),
    (20, 0x7f7f7f_ff, "Glass"),
    (21, 0x7f7f7f_ff, "Lapis Lazuli Ore"),
    (22, 0x7f7f7f_ff, "Lapis Lazuli Block"),
    (23, 0x7f7f7f_ff, "Dispenser"),
    (24, 0xbfb882_ff, "Sandstone"),
    (25, 0x7f7f7f_ff, "Note Block"),
    (35, 0x7f7f7f_ff, "Wool"),
    (37, 0x7f7f7f_ff, "Yellow flower"),
    (38, 0x7f7f7f_ff, "Red rose"),
    (39, 0x7f7f7f_ff, "Brown Mushroom"),
    (40, 0x7f7f7f_ff, "Red Mushroom"),
    (41, 0x7f7f7f_ff, "Gold Block"),
    (42, 0x7f7f7f_ff, "Iron Block"),
    (43, 0x7f7f7f_ff, "Double Stone Slab"),
    (44, 0x7f7f7f_ff, "Stone Slab"),
    (45, 0x7f7f7f_ff, "Brick"),
    (46, 0x7f7f7f_ff, "TNT"),
    (47, 0x7f7f7f_ff, "Bookshelf"),
    (48, 0x7f7f7f_ff, "Moss Stone"),
    (49, 0x7f7f7f_ff, "Obsidian"),
    (50, 0x7f7f7f_ff, "Torch"),
    (51, 0x7f7f7f_ff, "Fire"),
    (52, 0x7f7f7f_ff, "Monster Spawner"),
    (53, 0x7f7f7f_ff, "Wooden Stairs"),
    (54, 0x7f7f7f_ff, "Chest"),
    (55, 0x7f7f7f_ff, "Redstone Wire"),
    (56, 0x7f7f7f_ff, "Diamond Ore"),
    (57, 0x7f7f7f_ff, "Diamond Block"),
    (58, 0x7f7f7f_ff, "Workbench"),
    (59, 0x7f7f7f_ff, "Crops"),
    (60, 0x7f7f7f_ff, "Soil"),
    (61, 0x7f7f7f_ff, "Furnace"),
    (62, 0x7f7f7f_ff, "Burning Furnace"),
    (63, 0x7f7f7f_ff, "Sign Post"),
    (64, 0x7f7f7f_ff, "Wooden Door"),
    (65, 0x7f7f7f_ff, "Ladder"),
    (66, 0x7f7f7f_ff, "Minecart Tracks"),
    (67, 0x7f7f7f_ff, "Cobblestone Stairs"),
    (68, 0x7f7f7f_ff, "Wall Sign"),
    (69, 0x7f7f7f_ff, "Lever"),
    (70, 0x7f7f7f_ff, "Stone Pressure Plate"),
    (71, 0x7f7f7f_ff, "Iron Door"),
    (72, 0x7f7f7f_ff, "Wooden Pressure Plate"),
    (73, 0x7f7f7f_ff, "Redstone Ore"),
    (74, 0x7f7f7f_ff, "Glowing Redstone Ore"),
    (75, 0x7f7f7f_ff, "Redstone torch (\"off\" state)"),
    (76, 0x7f7f7f_ff, "Redstone torch (\"on\" state)"),
    (77, 0x7f7f7f_ff, "Stone Button"),
    (78, 0xffffff_ff, "Snow"),
    (79, 0x70a0ff_ff, "Ice"),
    (80, 0xffffff_ff, "Snow Block"),
    (81, 0x7f7f7f_ff, "Cactus"),
    (82, 0x7f7f7f_ff, "Clay"),
    (83, 0x7f7f7f_ff, "Sugar Cane"),
    (84, 0x7f7f7f_ff, "Jukebox"),
    (85, 0x7f7f7f_ff, "Fence"),
    (86, 0x7f7f7f_ff, "Pumpkin"),
    (87, 0x7f7f7f_ff, "Netherrack"),
    (88, 0x7f7f7f_ff, "Soul Sand"),
    (89, 0x7f7f7f_ff, "Glowstone"),
    (90, 0x7f7f7f_ff, "Portal"),
    (91, 0x7f7f7f_ff, "Jack-O-Lantern"),
    (92, 0xffffff_ff, "Cake Block"),
];

